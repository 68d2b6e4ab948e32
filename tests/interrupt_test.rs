//! Interrupt handling tests.
//!
//! Tests cover:
//! - NMI edge latching, priority and ignoring the I flag
//! - IRQ level behaviour, masking by I and re-entry after RTI
//! - Bus-driven IRQ via `MemoryBus::irq_active`
//! - Break bit in the pushed status for each interrupt kind
//! - Reset sequence state and timing

use lib6502::{CpuConfig, FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000,
/// NMI handler at 0x9000 and IRQ handler at 0xA000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFA, &[0x00, 0x90, 0x00, 0x80, 0x00, 0xA0]);
    for addr in 0x8000..0x8010 {
        memory.write(addr, 0xEA); // NOP
    }
    memory.write(0x9000, 0x40); // RTI
    memory.write(0xA000, 0x40); // RTI
    CPU::new(memory)
}

/// A flat bus with a device-driven IRQ line
struct IrqBus {
    memory: FlatMemory,
    irq: bool,
}

impl MemoryBus for IrqBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    fn tick(&mut self) {
        self.memory.tick();
    }

    fn irq_active(&self) -> bool {
        self.irq
    }
}

// ========== NMI ==========

#[test]
fn test_nmi_serviced_at_next_step() {
    let mut cpu = setup_cpu();
    cpu.request_nmi();
    assert!(cpu.nmi_pending());

    assert_eq!(cpu.step(), Ok(7));

    assert_eq!(cpu.pc(), 0x9000);
    assert!(!cpu.nmi_pending());
    assert!(cpu.flag_i());
    assert_eq!(cpu.sp(), 0xFA);
    assert_eq!(cpu.memory().peek(0x01FD), 0x80);
    assert_eq!(cpu.memory().peek(0x01FC), 0x00);
    // Break clear, unused set, I from reset
    assert_eq!(cpu.memory().peek(0x01FB), 0x24);
}

#[test]
fn test_nmi_ignores_interrupt_disable() {
    let mut cpu = setup_cpu();
    assert!(cpu.flag_i());
    cpu.request_nmi();

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x9000);
}

#[test]
fn test_nmi_requests_collapse_into_one() {
    let mut cpu = setup_cpu();
    cpu.request_nmi();
    cpu.request_nmi();

    cpu.step().unwrap(); // enter
    cpu.step().unwrap(); // RTI

    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.step(), Ok(2)); // NOP, no second NMI
}

#[test]
fn test_nmi_wins_over_irq() {
    let mut cpu = setup_cpu();
    cpu.set_flag_i(false);
    cpu.set_irq_line(true);
    cpu.request_nmi();

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x9000);
}

// ========== IRQ ==========

#[test]
fn test_irq_masked_while_i_set() {
    let mut cpu = setup_cpu();
    cpu.set_irq_line(true);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_irq_after_cli() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x58); // CLI
    cpu.set_irq_line(true);

    // CLI runs: the line was sampled with I still set
    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.pc(), 0x8001);

    assert_eq!(cpu.step(), Ok(7));
    assert_eq!(cpu.pc(), 0xA000);
    assert_eq!(cpu.memory().peek(0x01FD), 0x80);
    assert_eq!(cpu.memory().peek(0x01FC), 0x01);
    // Break and unused set, I clear after CLI
    assert_eq!(cpu.memory().peek(0x01FB), 0x30);
}

#[test]
fn test_irq_reenters_while_line_held() {
    let mut cpu = setup_cpu();
    cpu.set_flag_i(false);
    cpu.set_irq_line(true);

    cpu.step().unwrap(); // enter
    assert_eq!(cpu.pc(), 0xA000);

    cpu.step().unwrap(); // RTI restores I clear
    assert_eq!(cpu.pc(), 0x8000);

    assert_eq!(cpu.step(), Ok(7)); // line still held
    assert_eq!(cpu.pc(), 0xA000);
}

#[test]
fn test_irq_released_returns_to_program() {
    let mut cpu = setup_cpu();
    cpu.set_flag_i(false);
    cpu.set_irq_line(true);

    cpu.step().unwrap();
    cpu.set_irq_line(false);
    cpu.step().unwrap();

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_irq_from_bus_device() {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFC, &[0x00, 0x80, 0x00, 0xA0]);
    memory.write(0x8000, 0xEA);
    let mut cpu = CPU::new(IrqBus { memory, irq: false });
    cpu.set_flag_i(false);

    assert_eq!(cpu.step(), Ok(2));
    assert!(!cpu.irq_line());

    cpu.memory_mut().irq = true;
    assert!(cpu.irq_line());
    assert_eq!(cpu.step(), Ok(7));
    assert_eq!(cpu.pc(), 0xA000);
}

#[test]
fn test_irq_pushes_break_set_by_default() {
    let mut cpu = setup_cpu();
    cpu.set_flag_i(false);
    cpu.set_irq_line(true);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().peek(0x01FB) & 0x10, 0x10);
    // The register itself never holds Break
    assert_eq!(cpu.status() & 0x10, 0);
}

#[test]
fn test_irq_break_bit_clear_variant() {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFC, &[0x00, 0x80, 0x00, 0xA0]);
    let mut cpu = CPU::with_config(memory, CpuConfig::nmos().with_irq_pushes_break(false));
    cpu.set_flag_i(false);
    cpu.set_irq_line(true);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().peek(0x01FB), 0x20);
}

#[test]
fn test_nmi_pushes_break_clear_in_every_config() {
    for config in [CpuConfig::nmos(), CpuConfig::nmos().with_irq_pushes_break(false)] {
        let mut memory = FlatMemory::new();
        memory.load(0xFFFA, &[0x00, 0x90, 0x00, 0x80]);
        let mut cpu = CPU::with_config(memory, config);
        cpu.request_nmi();

        cpu.step().unwrap();

        assert_eq!(cpu.memory().peek(0x01FB) & 0x10, 0);
    }
}

#[test]
fn test_handler_runs_on_following_step() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x9000, 0xE8); // INX
    cpu.request_nmi();

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x00);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x01);
}

// ========== Reset ==========

#[test]
fn test_reset_state() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x12);
    cpu.set_x(0x34);
    cpu.set_y(0x56);
    cpu.set_sp(0x10);
    cpu.set_status(0xFF);
    cpu.set_pc(0x1234);

    let before = cpu.cycles();
    cpu.reset();

    assert_eq!(cpu.cycles() - before, 7);
    assert_eq!(cpu.a(), 0);
    assert_eq!(cpu.x(), 0);
    assert_eq!(cpu.y(), 0);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.status(), 0x24);
    assert_eq!(cpu.pc(), 0x8000);
}

#[test]
fn test_reset_writes_nothing_to_stack() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x01FB, &[0xAA, 0xBB, 0xCC]);

    cpu.reset();

    assert_eq!(cpu.memory().page(0x01)[0xFB..=0xFD], [0xAA, 0xBB, 0xCC]);
}
