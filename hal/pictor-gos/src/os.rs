//! Host scheduler binding
//!
//! Implemented once per RTOS. All methods are blocking with respect to the
//! calling thread; the graphics stack never yields except through them.

/// Thread priority, interpreted by the host scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Priority(pub u8);

/// How long a semaphore take may block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wait {
    /// Poll once without blocking
    Immediate,
    /// Block for at most this many scheduler ticks (always >= 1)
    Ticks(u32),
    /// Block until the semaphore is signalled
    Forever,
}

/// Thread entry point
///
/// The argument is passed through untouched from thread creation.
pub type ThreadEntry = fn(usize);

/// Backend errors from thread creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpawnError {
    /// No memory for the task control block
    OutOfMemory,
    /// Scheduler refused the task (bad priority, stack too small, ...)
    Rejected,
}

/// Conditions that stop all forward progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fatal {
    /// A rendering or input thread could not be created
    ThreadCreate(SpawnError),
}

/// Host scheduler operations
pub trait Os {
    /// Semaphore type of the host scheduler
    type Semaphore;

    /// Thread handle type of the host scheduler
    type Thread;

    /// Scheduler tick rate
    const TICKS_PER_SECOND: u32;

    /// Block the calling thread for `ticks` scheduler ticks
    fn sleep_ticks(&self, ticks: u32);

    /// Take one unit from a semaphore
    ///
    /// Returns `true` if the semaphore was acquired, `false` on timeout.
    fn semaphore_take(&self, semaphore: &Self::Semaphore, wait: Wait) -> bool;

    /// Create and start a thread
    ///
    /// # Arguments
    /// * `stack` - Stack area for the new thread
    /// * `priority` - Scheduler priority
    /// * `entry` - Thread entry point
    /// * `arg` - Value handed to `entry`
    fn spawn(
        &self,
        stack: &'static mut [u8],
        priority: Priority,
        entry: ThreadEntry,
        arg: usize,
    ) -> Result<Self::Thread, SpawnError>;

    /// Stop forward progress
    ///
    /// The default spins forever. Bindings may reset the board or enter a
    /// debugger breakpoint instead, but must not return.
    fn halt(&self, _reason: Fatal) -> ! {
        loop {
            core::hint::spin_loop();
        }
    }
}
