/// Runs data-parallel sections either on a dedicated bounded pool or on
/// rayon's global pool.
///
/// Every section is joined before `install` returns.
#[derive(Debug, Default)]
pub struct WorkerPool {
    dedicated: Option<rayon::ThreadPool>,
}

impl WorkerPool {
    /// # Errors
    ///
    /// Returns an error if the operating system refuses to spawn the workers.
    pub fn new(threads: usize) -> Result<Self, rayon::ThreadPoolBuildError> {
        if threads == 0 {
            return Ok(Self::default());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|idx| format!("bigedit-worker-{idx}"))
            .build()?;

        Ok(Self {
            dedicated: Some(pool),
        })
    }

    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.dedicated {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    #[must_use]
    pub fn threads(&self) -> usize {
        match &self.dedicated {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}
