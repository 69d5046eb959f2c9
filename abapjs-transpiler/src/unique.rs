//! Allocator for generated temporaries (`unique1`, `unique2`, ...)

#[derive(Debug, Default)]
pub struct UniqueNames {
    counter: u32,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> String {
        self.counter += 1;
        format!("unique{}", self.counter)
    }

    /// Start numbering from `unique1` again. Called once per run.
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    pub fn issued(&self) -> u32 {
        self.counter
    }
}
