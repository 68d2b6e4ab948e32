//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: A, X, Y, SP, PC and the packed status byte P (see [`Registers`])
//! - **Configuration**: chip-revision choices (see [`CpuConfig`])
//! - **Cycle counter**: number of bus ticks this CPU has issued
//! - **Interrupt inputs**: latched NMI edge and host IRQ line
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - `step()`: Execute one instruction (or one interrupt entry sequence)
//! - `run_for_cycles()`: Execute until cycle budget exhausted
//!
//! Every byte read or written goes through the bus followed by one `tick()`,
//! and internal cycles are a bare `tick()`, so the bus clock advances exactly
//! as the real chip's would.

use log::{trace, warn};

use crate::config::{CpuConfig, UndefinedOpcodePolicy};
use crate::instructions;
use crate::registers::Registers;
use crate::status::Status;
use crate::{ExecutionError, MemoryBus, OPCODE_TABLE};

/// 6502 CPU state and execution context.
///
/// The CPU is generic over the memory implementation via the `MemoryBus` trait.
/// It owns its registers and its bus handle; there is no global state, so any
/// number of CPUs can exist side by side.
///
/// # Examples
///
/// ```
/// use lib6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Low byte
/// memory.write(0xFFFD, 0x80); // High byte (PC = 0x8000)
///
/// // Initialize CPU - runs the reset sequence
/// let cpu = CPU::new(memory);
///
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i()); // Interrupt disable set on reset
/// assert_eq!(cpu.cycles(), 7);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Register file
    pub(crate) regs: Registers,

    /// Chip-revision configuration
    pub(crate) config: CpuConfig,

    /// Total bus ticks issued by this CPU
    pub(crate) cycles: u64,

    /// NMI edge latched, serviced at the next instruction boundary
    pub(crate) nmi_pending: bool,

    /// Host-driven IRQ line level
    pub(crate) irq_line: bool,

    /// Opcode that halted the processor, until the next reset
    pub(crate) jammed: Option<u8>,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new NMOS CPU on the given bus and runs the reset sequence.
    ///
    /// The reset reads the program counter from the reset vector at
    /// 0xFFFC/0xFFFD and spends 7 cycles on the bus.
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    /// Creates a CPU with an explicit configuration and runs the reset sequence.
    ///
    /// ```
    /// use lib6502::{CPU, CpuConfig, FlatMemory};
    ///
    /// let cpu = CPU::with_config(FlatMemory::new(), CpuConfig::ricoh_2a03());
    /// assert_eq!(cpu.config(), CpuConfig::ricoh_2a03());
    /// ```
    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        let mut cpu = Self {
            regs: Registers::new(),
            config,
            cycles: 0,
            nmi_pending: false,
            irq_line: false,
            jammed: None,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Executes one instruction and returns the number of cycles it took.
    ///
    /// Pending interrupts are sampled first: if one is serviced, this call runs
    /// only the 7-cycle entry sequence and the handler starts on the next call.
    ///
    /// # Errors
    ///
    /// - `UnimplementedOpcode` if the opcode is undefined and the configured
    ///   policy does not execute it. PC is left on the opcode.
    /// - `Jammed` if a JAM opcode halted the processor (now or earlier).
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0x8000, 0xEA); // NOP
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.step(), Ok(2));
    /// assert_eq!(cpu.pc(), 0x8001);
    /// ```
    pub fn step(&mut self) -> Result<u64, ExecutionError> {
        if let Some(opcode) = self.jammed {
            return Err(ExecutionError::Jammed {
                opcode,
                pc: self.regs.pc,
            });
        }

        let start = self.cycles;

        if let Some(interrupt) = self.pending_interrupt() {
            self.service_interrupt(interrupt);
            return Ok(self.cycles - start);
        }

        let pc = self.regs.pc;
        let opcode = self.fetch_byte();
        let metadata = OPCODE_TABLE[opcode as usize];

        trace!(
            "{:04X}  {:02X}  {} {:?}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            pc,
            opcode,
            metadata.mnemonic,
            metadata.addressing_mode,
            self.regs.a,
            self.regs.x,
            self.regs.y,
            self.regs.p.bits(),
            self.regs.sp
        );

        if !metadata.documented
            && (self.config.undefined_opcodes == UndefinedOpcodePolicy::Fail
                || metadata.mnemonic.is_unstable())
        {
            warn!("Unimplemented opcode {:#04X} at {:#06X}", opcode, pc);
            self.regs.pc = pc;
            return Err(ExecutionError::UnimplementedOpcode { opcode, pc });
        }

        instructions::execute(self, opcode, &metadata)?;

        Ok(self.cycles - start)
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until at least `cycle_budget` cycles have been
    /// spent or an error occurs. Returns the number of cycles consumed, which
    /// may exceed the budget by up to one instruction.
    ///
    /// ```
    /// use lib6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// for addr in 0x8000..0x8010 {
    ///     mem.write(addr, 0xEA); // NOP
    /// }
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.run_for_cycles(10), Ok(10));
    /// assert_eq!(cpu.pc(), 0x8005);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let mut consumed = 0;

        while consumed < cycle_budget {
            consumed += self.step()?;
        }

        Ok(consumed)
    }

    // ========== Bus Beats ==========

    /// One clock cycle.
    #[inline]
    pub(crate) fn tick(&mut self) {
        self.memory.tick();
        self.cycles += 1;
    }

    /// Bus read cycle.
    #[inline]
    pub(crate) fn read(&mut self, addr: u16) -> u8 {
        let value = self.memory.read(addr);
        self.tick();
        value
    }

    /// Bus write cycle.
    #[inline]
    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
        self.tick();
    }

    /// Reads the byte at PC and advances PC.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Reads the little-endian word at PC and advances PC past it.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte();
        let hi = self.fetch_byte();
        u16::from_le_bytes([lo, hi])
    }

    pub(crate) fn push(&mut self, value: u8) {
        let addr = self.regs.push_addr();
        self.write(addr, value);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        let addr = self.regs.pull_addr();
        self.read(addr)
    }

    /// Reads a little-endian vector.
    pub(crate) fn read_vector(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr);
        let hi = self.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    // ========== Memory Access ==========

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    ///
    /// Accesses made through this reference are the host's own and are not
    /// counted as CPU cycles.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and hands the bus back.
    pub fn into_memory(self) -> M {
        self.memory
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.regs.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.regs.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.regs.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.regs.sp
    }

    /// Returns the status register as a packed byte (NV-BDIZC).
    ///
    /// Bit 5 always reads 1 and bit 4 (Break) always reads 0: the Break bit
    /// only exists in copies pushed to the stack.
    ///
    /// ```
    /// use lib6502::{CPU, FlatMemory};
    ///
    /// let cpu = CPU::new(FlatMemory::new());
    /// assert_eq!(cpu.status(), 0b0010_0100);
    /// ```
    pub fn status(&self) -> u8 {
        self.regs.p.bits()
    }

    /// Returns a snapshot of the register file.
    pub fn registers(&self) -> Registers {
        self.regs
    }

    /// Returns the active configuration.
    pub fn config(&self) -> CpuConfig {
        self.config
    }

    /// Returns the total number of bus cycles issued since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns true once a JAM opcode has halted the processor.
    pub fn is_jammed(&self) -> bool {
        self.jammed.is_some()
    }

    // ========== Status Flags ==========

    /// Returns whether a single flag is set.
    pub fn flag(&self, flag: Status) -> bool {
        self.regs.p.get(flag)
    }

    /// Sets or clears exactly one flag bit.
    pub fn set_flag(&mut self, flag: Status, value: bool) {
        self.regs.p.set(flag, value);
    }

    /// Sets Z iff `value` is zero and N iff bit 7 of `value` is set.
    pub fn set_flags_zero_negative(&mut self, value: u8) {
        self.regs.p.set_zn(value);
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag(Status::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag(Status::OVERFLOW)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag(Status::DECIMAL)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag(Status::INTERRUPT_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag(Status::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag(Status::CARRY)
    }

    // ========== Setters ==========

    /// Sets the accumulator. Flags are not touched.
    pub fn set_a(&mut self, value: u8) {
        self.regs.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.regs.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.regs.y = value;
    }

    /// Sets the program counter; the next `step()` fetches from here.
    pub fn set_pc(&mut self, value: u16) {
        self.regs.pc = value;
    }

    /// Sets the stack pointer (offset into page 0x01).
    pub fn set_sp(&mut self, value: u8) {
        self.regs.sp = value;
    }

    /// Loads the status register from a byte, as PLP would.
    pub fn set_status(&mut self, value: u8) {
        self.regs.p = Status::from_pulled(value);
    }

    /// Sets the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.set_flag(Status::NEGATIVE, value);
    }

    /// Sets the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.set_flag(Status::OVERFLOW, value);
    }

    /// Sets the Decimal flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.set_flag(Status::DECIMAL, value);
    }

    /// Sets the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.set_flag(Status::INTERRUPT_DISABLE, value);
    }

    /// Sets the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.set_flag(Status::ZERO, value);
    }

    /// Sets the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.set_flag(Status::CARRY, value);
    }
}
