//! Portable OS front-end
//!
//! Wraps an [`Os`] binding with duration handling and the thread creation
//! policy shared by every port.

use embassy_time::Duration;

use crate::os::{Fatal, Os, Priority, ThreadEntry, Wait};
use crate::ticks::{ticks_for, ticks_for_micros};

/// Outcome of a timed semaphore wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitResult {
    /// The semaphore was taken
    Acquired,
    /// The timeout expired first
    TimedOut,
}

impl WaitResult {
    fn from_taken(taken: bool) -> Self {
        if taken {
            WaitResult::Acquired
        } else {
            WaitResult::TimedOut
        }
    }

    /// Check if the semaphore was taken
    pub fn is_acquired(self) -> bool {
        self == WaitResult::Acquired
    }
}

/// OS front-end used by the rest of the stack
pub struct Gos<O> {
    os: O,
}

impl<O: Os> Gos<O> {
    /// Wrap a scheduler binding
    pub const fn new(os: O) -> Self {
        Self { os }
    }

    /// Access the underlying binding
    pub fn os(&self) -> &O {
        &self.os
    }

    /// Sleep for at least `duration`
    ///
    /// Always blocks for at least one tick, even for a zero duration.
    pub fn sleep(&self, duration: Duration) {
        self.os.sleep_ticks(ticks_for(duration, O::TICKS_PER_SECOND));
    }

    /// Sleep for at least `micros` microseconds
    pub fn sleep_micros(&self, micros: u64) {
        self.os.sleep_ticks(ticks_for_micros(micros, O::TICKS_PER_SECOND));
    }

    /// Wait on a semaphore for at most `timeout`
    pub fn semaphore_wait(&self, semaphore: &O::Semaphore, timeout: Duration) -> WaitResult {
        let ticks = ticks_for(timeout, O::TICKS_PER_SECOND);
        WaitResult::from_taken(self.os.semaphore_take(semaphore, Wait::Ticks(ticks)))
    }

    /// Take a semaphore only if it is immediately available
    ///
    /// Safe to call from contexts that must not block.
    pub fn semaphore_try(&self, semaphore: &O::Semaphore) -> WaitResult {
        WaitResult::from_taken(self.os.semaphore_take(semaphore, Wait::Immediate))
    }

    /// Wait on a semaphore without a timeout
    pub fn semaphore_wait_forever(&self, semaphore: &O::Semaphore) {
        while !self.os.semaphore_take(semaphore, Wait::Forever) {}
    }

    /// Create a thread
    ///
    /// There is no degraded mode without the rendering and input threads,
    /// so a backend failure halts the system through [`Os::halt`]. This
    /// never retries and never returns an error.
    pub fn create_thread(
        &self,
        stack: &'static mut [u8],
        priority: Priority,
        entry: ThreadEntry,
        arg: usize,
    ) -> O::Thread {
        match self.os.spawn(stack, priority, entry, arg) {
            Ok(thread) => thread,
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Thread creation failed: {:?}, halting", e);
                self.os.halt(Fatal::ThreadCreate(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::os::SpawnError;
    use core::cell::{Cell, RefCell};

    /// Scheduler running at 100 Hz that records every call
    struct MockOs {
        slept: RefCell<Vec<u32>>,
        waits: RefCell<Vec<Wait>>,
        available: Cell<bool>,
        spawn_result: Result<usize, SpawnError>,
        spawned: Cell<u32>,
    }

    impl MockOs {
        fn new() -> Self {
            Self {
                slept: RefCell::new(Vec::new()),
                waits: RefCell::new(Vec::new()),
                available: Cell::new(false),
                spawn_result: Ok(7),
                spawned: Cell::new(0),
            }
        }
    }

    impl Os for MockOs {
        type Semaphore = ();
        type Thread = usize;

        const TICKS_PER_SECOND: u32 = 100;

        fn sleep_ticks(&self, ticks: u32) {
            self.slept.borrow_mut().push(ticks);
        }

        fn semaphore_take(&self, _semaphore: &(), wait: Wait) -> bool {
            self.waits.borrow_mut().push(wait);
            self.available.get()
        }

        fn spawn(
            &self,
            _stack: &'static mut [u8],
            _priority: Priority,
            _entry: ThreadEntry,
            _arg: usize,
        ) -> Result<usize, SpawnError> {
            self.spawned.set(self.spawned.get() + 1);
            self.spawn_result
        }

        fn halt(&self, reason: Fatal) -> ! {
            panic!("halted: {:?}", reason);
        }
    }

    fn stack() -> &'static mut [u8] {
        Box::leak(vec![0u8; 256].into_boxed_slice())
    }

    fn noop(_arg: usize) {}

    #[test]
    fn test_sleep_rounds_up_to_one_tick() {
        let gos = Gos::new(MockOs::new());
        gos.sleep(Duration::from_micros(1));
        gos.sleep(Duration::from_millis(0));
        gos.sleep_micros(0);
        assert_eq!(*gos.os().slept.borrow(), vec![1, 1, 1]);
    }

    #[test]
    fn test_sleep_converts_milliseconds() {
        let gos = Gos::new(MockOs::new());
        gos.sleep(Duration::from_millis(250));
        assert_eq!(*gos.os().slept.borrow(), vec![25]);
    }

    #[test]
    fn test_semaphore_wait_timeout() {
        let gos = Gos::new(MockOs::new());
        let result = gos.semaphore_wait(&(), Duration::from_millis(5));
        assert_eq!(result, WaitResult::TimedOut);
        // 5ms on a 10ms tick must still block for one tick
        assert_eq!(*gos.os().waits.borrow(), vec![Wait::Ticks(1)]);
    }

    #[test]
    fn test_semaphore_try_is_immediate() {
        let gos = Gos::new(MockOs::new());
        gos.os().available.set(true);
        assert!(gos.semaphore_try(&()).is_acquired());
        assert_eq!(*gos.os().waits.borrow(), vec![Wait::Immediate]);
    }

    #[test]
    fn test_create_thread_success() {
        let gos = Gos::new(MockOs::new());
        let thread = gos.create_thread(stack(), Priority(3), noop, 0);
        assert_eq!(thread, 7);
        assert_eq!(gos.os().spawned.get(), 1);
    }

    #[test]
    #[should_panic(expected = "halted")]
    fn test_create_thread_failure_halts() {
        let mut os = MockOs::new();
        os.spawn_result = Err(SpawnError::OutOfMemory);
        let gos = Gos::new(os);
        gos.create_thread(stack(), Priority(3), noop, 0);
    }
}
