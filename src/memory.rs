//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from the
//! memory and peripherals it drives. The bus is owned by the host: RAM, ROM
//! banking and memory-mapped I/O all live behind it.
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows 6502 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - One `tick()` per bus beat, so the bus owns the shared cycle counter
//! - Reads take `&mut self` because mapped I/O registers may change state when read
//! - Access order is significant and is preserved exactly by the CPU

/// Memory bus trait for CPU to read/write bytes and advance the clock.
///
/// The CPU accesses all memory (RAM, ROM, I/O) through this abstraction and
/// calls `tick()` once for every cycle it spends, including the cycles where
/// the real chip performs no useful access.
///
/// # Examples
///
/// ```
/// use lib6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
///
/// // Plain reads and writes by the host do not advance the clock
/// assert_eq!(mem.ticks(), 0);
/// mem.tick();
/// assert_eq!(mem.ticks(), 1);
/// ```
///
/// ## Implementing Custom Memory
///
/// A bus with a countdown timer at $D000 that raises IRQ when it expires.
/// The timer runs off `tick`, so it sees exactly the cycles the CPU spends.
///
/// ```
/// use lib6502::MemoryBus;
///
/// struct TimerBus {
///     ram: Vec<u8>,
///     timer: u8,
/// }
///
/// impl MemoryBus for TimerBus {
///     fn read(&mut self, addr: u16) -> u8 {
///         match addr {
///             0xD000 => self.timer,
///             _ => self.ram[addr as usize],
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         match addr {
///             0xD000 => self.timer = value,
///             _ => self.ram[addr as usize] = value,
///         }
///     }
///
///     fn tick(&mut self) {
///         self.timer = self.timer.saturating_sub(1);
///     }
///
///     fn irq_active(&self) -> bool {
///         self.timer == 0
///     }
/// }
///
/// let mut bus = TimerBus { ram: vec![0; 0x10000], timer: 3 };
/// bus.tick();
/// bus.tick();
/// assert!(!bus.irq_active());
/// bus.tick();
/// assert!(bus.irq_active());
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// This method must never panic. If the address is unmapped, implementations
    /// may return garbage data (matching 6502 hardware behavior).
    fn read(&mut self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// This method must never panic. If the address is read-only or unmapped,
    /// implementations may ignore the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Advances the shared cycle counter by one clock cycle.
    ///
    /// The CPU calls this once after every `read` and `write` it issues, and
    /// once for every internal cycle (index addition, page-cross fixup,
    /// taken branch, stack pointer adjustment, dummy RMW write).
    fn tick(&mut self);

    /// Checks if the IRQ (Interrupt Request) line is active.
    ///
    /// The IRQ line on the 6502 is **level-sensitive** and **shared** among all
    /// devices. The CPU polls it at every instruction boundary and services it
    /// only while the Interrupt Disable flag is clear.
    ///
    /// Returns `false` by default, for buses without interrupt sources.
    ///
    /// ```
    /// use lib6502::{MemoryBus, FlatMemory};
    ///
    /// let mem = FlatMemory::new();
    /// assert!(!mem.irq_active());
    /// ```
    fn irq_active(&self) -> bool {
        false
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses are mapped to a single contiguous RAM array, and the
/// bus keeps its own tick counter. Useful for testing, for the WASM surface,
/// and for programs that don't need ROM/RAM distinction.
///
/// ```
/// use lib6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Reset vector low byte
/// memory.write(0xFFFD, 0x80); // Reset vector high byte (PC = 0x8000)
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.memory().ticks(), 7); // reset sequence
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,

    /// Clock cycles elapsed on this bus
    ticks: u64,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
            ticks: 0,
        }
    }

    /// Copies `bytes` into memory starting at `start`, wrapping past 0xFFFF.
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        let mut addr = start;
        for &byte in bytes {
            self.data[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Returns the number of clock cycles ticked on this bus.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Reads a byte without side effects.
    pub fn peek(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    /// Returns a 256-byte page of memory without side effects.
    pub fn page(&self, page: u8) -> &[u8] {
        let start = (page as usize) << 8;
        &self.data[start..start + 0x100]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&mut self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    fn tick(&mut self) {
        self.ticks += 1;
    }
}
