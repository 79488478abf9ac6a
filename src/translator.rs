use log::debug;

use crate::address::VirtualAddress;
use crate::backing::PageSource;
use crate::constants::{NUM_FRAMES, NUM_PAGES, TLB_CAPACITY};
use crate::dirty::{DirtyClass, DirtyTracker};
use crate::error::{PagerError, Result};
use crate::memory::PhysicalMemory;
use crate::page_table::PageTable;
use crate::tlb::TranslationCache;

/// What the stream driver does with a record it cannot parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Log the record and move on to the next line.
    Skip,
    /// End the address stream cleanly at the first bad record.
    Terminate,
}

/// Configuration of one simulator run. Each of the original program
/// variants is available as a preset.
#[derive(Debug, Clone, Copy)]
pub struct PagerConfig {
    pub enable_replacement: bool,
    pub track_dirty_bit: bool,
    pub tlb_capacity: usize,
    pub frame_capacity: usize,
    pub parse_policy: ParsePolicy,
}

impl PagerConfig {
    /// Physical memory spans the whole virtual space, so no eviction ever
    /// happens.
    pub fn same_size() -> Self {
        PagerConfig {
            enable_replacement: false,
            track_dirty_bit: false,
            tlb_capacity: TLB_CAPACITY,
            frame_capacity: NUM_PAGES,
            parse_policy: ParsePolicy::Terminate,
        }
    }

    /// Physical memory holds half the virtual space; LRU replacement under
    /// pressure.
    pub fn replacement() -> Self {
        PagerConfig {
            enable_replacement: true,
            track_dirty_bit: false,
            tlb_capacity: TLB_CAPACITY,
            frame_capacity: NUM_FRAMES,
            parse_policy: ParsePolicy::Terminate,
        }
    }

    /// Replacement plus per-page modification tracking and write-back
    /// counting.
    pub fn dirty_bit() -> Self {
        PagerConfig {
            track_dirty_bit: true,
            ..Self::replacement()
        }
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self::replacement()
    }
}

/// How a single address was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    TlbHit,
    TableHit,
    Fault,
}

/// Result of translating one logical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub virtual_addr: u32,
    pub physical_addr: usize,
    pub value: i8,
    pub outcome: Outcome,
}

/// End-of-run counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Statistics {
    pub total: u64,
    pub tlb_hits: u64,
    pub page_faults: u64,
    pub write_backs: u64,
}

impl Statistics {
    /// Page-fault rate, or 0.0 when no addresses were processed.
    pub fn fault_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.page_faults as f64 / self.total as f64
        }
    }

    /// TLB hit rate, or 0.0 when no addresses were processed.
    pub fn tlb_hit_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.tlb_hits as f64 / self.total as f64
        }
    }
}

/// The translation state machine. All simulator state lives here and is
/// threaded through every operation; a fault plus its eviction is one
/// atomic unit within `translate`.
pub struct Translator<S> {
    config: PagerConfig,
    tlb: TranslationCache,
    page_table: PageTable,
    memory: PhysicalMemory,
    dirty: DirtyTracker,
    store: S,
    clock: u64,
    stats: Statistics,
}

impl<S: PageSource> Translator<S> {
    pub fn new(config: PagerConfig, store: S) -> Self {
        Translator {
            tlb: TranslationCache::new(config.tlb_capacity),
            page_table: PageTable::new(),
            memory: PhysicalMemory::new(config.frame_capacity),
            dirty: DirtyTracker::new(),
            store,
            clock: 0,
            stats: Statistics::default(),
            config,
        }
    }

    #[inline]
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    #[inline]
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Translate one logical address: probe the TLB, then the page table,
    /// and on a double miss fault the page in from the backing store,
    /// evicting first if physical memory is full.
    pub fn translate(&mut self, addr: u32, tag: Option<DirtyClass>) -> Result<Translation> {
        let va = VirtualAddress::from_raw(addr);
        self.clock += 1;
        let now = self.clock;

        if self.config.track_dirty_bit {
            self.dirty
                .classify(va.page, tag.unwrap_or(DirtyClass::Unclassified));
        }

        let (frame_base, outcome) = if let Some(frame) = self.tlb.lookup(va.page) {
            debug_assert_eq!(
                self.page_table.get(va.page).map(|e| e.frame_base),
                Some(frame),
                "orphaned TLB entry for page {}",
                va.page
            );
            self.stats.tlb_hits += 1;
            (frame, Outcome::TlbHit)
        } else if let Some(frame) = self.page_table.lookup(va.page, now) {
            // promote the page into the TLB
            self.tlb.insert(va.page, frame);
            (frame, Outcome::TableHit)
        } else {
            let frame = self.fault(va.page, now)?;
            (frame, Outcome::Fault)
        };

        self.stats.total += 1;

        let physical_addr = frame_base + va.offset;
        let value = self.memory.read(physical_addr);

        Ok(Translation {
            virtual_addr: addr,
            physical_addr,
            value,
            outcome,
        })
    }

    /// Page fault: read the page in full, claim a frame (evicting if
    /// necessary), then install the mapping in the page table and the TLB.
    fn fault(&mut self, page: usize, now: u64) -> Result<usize> {
        self.stats.page_faults += 1;
        debug!("page fault: page {page}");

        // The page is read completely before any state changes, so an I/O
        // failure leaves nothing mapped.
        let bytes = self.store.page_in(page)?;

        let frame_base = match self.memory.allocate() {
            Some(base) => base,
            None => {
                if !self.config.enable_replacement {
                    return Err(PagerError::FramesExhausted);
                }
                self.evict_victim()?
            }
        };

        self.memory.load_frame(frame_base, &bytes);
        self.page_table.insert(page, frame_base, now);
        self.tlb.insert(page, frame_base);

        Ok(frame_base)
    }

    /// Select the global LRU victim, count its write-back if it was
    /// modified, and unmap it from both the page table and the TLB.
    fn evict_victim(&mut self) -> Result<usize> {
        let victim = self
            .page_table
            .lru_victim()
            .ok_or_else(|| PagerError::Invariant("memory full but no pages mapped".into()))?;

        if self.config.track_dirty_bit && self.dirty.needs_write_back(victim) {
            self.stats.write_backs += 1;
            debug!("page {victim} is modified and is swapped back to the store");
        }

        let frame_base = self
            .page_table
            .evict(victim)
            .ok_or_else(|| PagerError::Invariant(format!("victim page {victim} not mapped")))?;
        self.tlb.purge(victim);
        debug!("evicted page {victim} from frame base {frame_base}");

        Ok(frame_base)
    }
}
