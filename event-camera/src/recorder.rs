/// Elapsed-time counter shown while recording.
///
/// Starts at 0, advances by one per tick (one tick per second) while running
/// and goes back to 0 when stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordingClock {
    running: bool,
    elapsed_secs: u32,
}

impl RecordingClock {
    pub fn start(&mut self) {
        self.running = true;
        self.elapsed_secs = 0;
    }

    /// Stops the clock and returns the elapsed seconds at stop time
    pub fn stop(&mut self) -> u32 {
        let elapsed = self.elapsed_secs;
        self.running = false;
        self.elapsed_secs = 0;
        elapsed
    }

    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }
}

/// Concatenates recorder chunks into one webm payload, skipping empty chunks
pub fn assemble_chunks(chunks: Vec<Vec<u8>>) -> Vec<u8> {
    let total = chunks.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(total);
    for chunk in chunks.into_iter().filter(|c| !c.is_empty()) {
        out.extend_from_slice(&chunk);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_counts_only_while_running() {
        let mut clock = RecordingClock::default();
        clock.tick();
        assert_eq!(clock.elapsed_secs(), 0);

        clock.start();
        assert_eq!(clock.elapsed_secs(), 0);
        clock.tick();
        clock.tick();
        assert_eq!(clock.elapsed_secs(), 2);

        assert_eq!(clock.stop(), 2);
        assert_eq!(clock.elapsed_secs(), 0);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_assemble_keeps_order() {
        let data = assemble_chunks(vec![vec![1, 2], vec![], vec![3], vec![4, 5]]);
        assert_eq!(data, vec![1, 2, 3, 4, 5]);
    }
}
