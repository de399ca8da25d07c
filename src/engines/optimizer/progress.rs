use super::engine::{Phase, ProgressCallback};

/// Logs generation progress to the console.
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_phase(&mut self, _iteration: usize, _phase: Phase) {}

    fn on_generation_start(&mut self, iteration: usize) {
        log::info!("Generation {} starting...", iteration + 1);
    }

    fn on_generation_complete(&mut self, iteration: usize, best_weighted_sum: f64, front_size: usize) {
        log::info!(
            "Generation {} complete. Best weighted sum: {:.4}, front 0 size: {}",
            iteration + 1,
            best_weighted_sum,
            front_size
        );
    }

    fn on_individual_evaluated(&mut self, individual_num: usize, total: usize) {
        if individual_num % 10 == 0 || individual_num == total {
            log::debug!("  Evaluated {}/{} individuals", individual_num, total);
        }
    }
}

/// Callback that never reports; for headless runs and tests.
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_phase(&mut self, _iteration: usize, _phase: Phase) {}
    fn on_generation_start(&mut self, _iteration: usize) {}
    fn on_generation_complete(&mut self, _iteration: usize, _best: f64, _front_size: usize) {}
    fn on_individual_evaluated(&mut self, _individual_num: usize, _total: usize) {}
}

/// Progress message for channel consumers (dashboards, supervisors).
pub enum ProgressMessage {
    PhaseEntered { iteration: usize, phase: Phase },
    GenerationStart(usize),
    GenerationComplete {
        iteration: usize,
        best_weighted_sum: f64,
        front_size: usize,
    },
    IndividualEvaluated { current: usize, total: usize },
}

/// Forwards progress through an mpsc channel; send failures are ignored so a
/// departed consumer never stalls the run.
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_phase(&mut self, iteration: usize, phase: Phase) {
        let _ = self.sender.send(ProgressMessage::PhaseEntered { iteration, phase });
    }

    fn on_generation_start(&mut self, iteration: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(iteration));
    }

    fn on_generation_complete(&mut self, iteration: usize, best_weighted_sum: f64, front_size: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            iteration,
            best_weighted_sum,
            front_size,
        });
    }

    fn on_individual_evaluated(&mut self, individual_num: usize, total: usize) {
        let _ = self.sender.send(ProgressMessage::IndividualEvaluated {
            current: individual_num,
            total,
        });
    }
}
