//! # Interrupt Sequencer
//!
//! Reset, NMI, IRQ and BRK all redirect execution through a fixed vector.
//! The hardware-accurate model used here:
//!
//! - **NMI** is edge-triggered: `request_nmi()` latches one request, which is
//!   serviced at the next instruction boundary and is never masked.
//! - **IRQ** is level-sensitive: the line is active while the host holds it
//!   (`set_irq_line`) or the bus reports `irq_active()`. It is serviced at an
//!   instruction boundary only while the I flag is clear, and re-enters the
//!   handler after RTI if nobody acknowledged the source.
//! - **Reset** runs immediately and pushes nothing.
//!
//! ## Entry Sequence
//!
//! IRQ and NMI spend 7 cycles:
//!
//! 1. Two internal cycles
//! 2. Push PC high byte, then PC low byte
//! 3. Push the status byte (bit 5 set; B set for IRQ unless
//!    `CpuConfig::irq_pushes_break` is off, always clear for NMI)
//! 4. Set the I flag
//! 5. Read the new PC from the vector (low byte, then high byte)
//!
//! BRK does the same after its opcode fetch and padding byte, with B set.

use log::debug;

use crate::registers::RESET_SP;
use crate::status::Status;
use crate::{MemoryBus, CPU};

/// NMI vector (0xFFFA-0xFFFB).
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector (0xFFFC-0xFFFD).
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector (0xFFFE-0xFFFF).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Kind of interrupt sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Reset,
    Nmi,
    Irq,
    /// Software interrupt raised by the BRK instruction.
    Brk,
}

impl Interrupt {
    /// Address of the little-endian handler pointer for this kind.
    ///
    /// ```
    /// use lib6502::Interrupt;
    ///
    /// assert_eq!(Interrupt::Nmi.vector(), 0xFFFA);
    /// assert_eq!(Interrupt::Brk.vector(), Interrupt::Irq.vector());
    /// ```
    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::Reset => RESET_VECTOR,
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq | Interrupt::Brk => IRQ_VECTOR,
        }
    }
}

impl<M: MemoryBus> CPU<M> {
    /// Runs the reset sequence.
    ///
    /// A, X and Y are cleared, SP becomes 0xFD, P becomes 0x24 (I set, D
    /// clear), pending interrupts and a jammed state are dropped, and PC is
    /// loaded from the reset vector. Takes 7 cycles; the three stack cycles
    /// are suppressed reads on hardware and write nothing.
    ///
    /// ```
    /// use lib6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x34);
    /// mem.write(0xFFFD, 0x12);
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.set_a(0x55);
    /// cpu.set_pc(0x4000);
    ///
    /// cpu.reset();
    /// assert_eq!(cpu.a(), 0x00);
    /// assert_eq!(cpu.pc(), 0x1234);
    /// assert_eq!(cpu.cycles(), 14);
    /// ```
    pub fn reset(&mut self) {
        for _ in 0..5 {
            self.tick();
        }

        self.regs.a = 0;
        self.regs.x = 0;
        self.regs.y = 0;
        self.regs.sp = RESET_SP;
        self.regs.p = Status::POWER_ON;
        self.nmi_pending = false;
        self.jammed = None;
        self.regs.pc = self.read_vector(RESET_VECTOR);

        debug!("Reset: PC={:#06X}", self.regs.pc);
    }

    /// Latches a non-maskable interrupt request.
    ///
    /// The request is serviced at the start of the next `step()`, even when
    /// the I flag is set. Requests made before then collapse into one.
    pub fn request_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Drives the host side of the IRQ line.
    ///
    /// The line stays asserted until the host releases it. The bus's
    /// `irq_active()` is OR-ed with this level.
    pub fn set_irq_line(&mut self, active: bool) {
        self.irq_line = active;
    }

    /// Returns true if the IRQ line is currently asserted by any source.
    pub fn irq_line(&self) -> bool {
        self.irq_line || self.memory.irq_active()
    }

    /// Returns true if an NMI edge is latched and not yet serviced.
    pub fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    /// Interrupt to service at this boundary, if any. NMI wins over IRQ.
    pub(crate) fn pending_interrupt(&self) -> Option<Interrupt> {
        if self.nmi_pending {
            Some(Interrupt::Nmi)
        } else if self.irq_line() && !self.regs.p.get(Status::INTERRUPT_DISABLE) {
            Some(Interrupt::Irq)
        } else {
            None
        }
    }

    /// Hardware interrupt entry: two internal cycles, then the shared sequence.
    pub(crate) fn service_interrupt(&mut self, kind: Interrupt) {
        if kind == Interrupt::Nmi {
            self.nmi_pending = false;
        }

        self.tick();
        self.tick();
        self.enter_interrupt(kind);
    }

    /// Pushes PC and P, sets I and jumps through the vector for `kind`.
    pub(crate) fn enter_interrupt(&mut self, kind: Interrupt) {
        let return_pc = self.regs.pc;
        let [lo, hi] = return_pc.to_le_bytes();
        let brk = match kind {
            Interrupt::Brk => true,
            Interrupt::Irq => self.config.irq_pushes_break,
            Interrupt::Nmi | Interrupt::Reset => false,
        };

        self.push(hi);
        self.push(lo);
        self.push(self.regs.p.for_push(brk));
        self.regs.p.insert(Status::INTERRUPT_DISABLE);
        self.regs.pc = self.read_vector(kind.vector());

        debug!(
            "{:?}: return address {:#06X}, handler {:#06X}",
            kind, return_pc, self.regs.pc
        );
    }
}
