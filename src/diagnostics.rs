//! Periodic heap report on the log stream.

/// Fires once every `period` calls to [`tick`](Self::tick).
#[derive(Clone, Debug)]
pub struct PeriodicTick {
    period: u32,
    elapsed: u32,
}

impl PeriodicTick {
    /// A `period` of 0 behaves like 1.
    pub const fn new(period: u32) -> Self {
        Self { period, elapsed: 0 }
    }

    pub fn tick(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}

/// Allocator introspection.
pub trait HeapStatistics {
    fn used(&self) -> usize;
    fn free(&self) -> usize;
}

#[cfg(feature = "firmware")]
impl HeapStatistics for embedded_alloc::LlffHeap {
    fn used(&self) -> usize {
        embedded_alloc::LlffHeap::used(self)
    }

    fn free(&self) -> usize {
        embedded_alloc::LlffHeap::free(self)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeapReport {
    pub used: usize,
    pub free: usize,
}

/// Logs a [`HeapReport`] every `period` UI loop iterations.
pub struct HeapReporter<'a, H> {
    heap: &'a H,
    schedule: PeriodicTick,
}

impl<'a, H> HeapReporter<'a, H>
where
    H: HeapStatistics,
{
    pub const fn new(heap: &'a H, period: u32) -> Self {
        Self {
            heap,
            schedule: PeriodicTick::new(period),
        }
    }

    pub fn tick(&mut self) -> Option<HeapReport> {
        if !self.schedule.tick() {
            return None;
        }
        let report = HeapReport {
            used: self.heap.used(),
            free: self.heap.free(),
        };
        info!("Heap used: {}  Heap free: {}", report.used, report.free);
        Some(report)
    }
}
