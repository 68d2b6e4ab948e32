//! Bus transaction ordering tests.
//!
//! Records every read, write and tick the CPU issues and checks the exact
//! sequence for representative instructions.

use lib6502::{CpuConfig, MemoryBus, UndefinedOpcodePolicy, CPU, OPCODE_TABLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Read(u16, u8),
    Write(u16, u8),
    Tick,
}

use Event::{Read, Tick, Write};

/// 64KB of RAM that logs every transaction
struct RecordingBus {
    memory: Vec<u8>,
    events: Vec<Event>,
}

impl RecordingBus {
    fn new() -> Self {
        let mut memory = vec![0; 0x10000];
        memory[0xFFFC] = 0x00;
        memory[0xFFFD] = 0x80;
        Self {
            memory,
            events: Vec::new(),
        }
    }
}

impl MemoryBus for RecordingBus {
    fn read(&mut self, addr: u16) -> u8 {
        let value = self.memory[addr as usize];
        self.events.push(Read(addr, value));
        value
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
        self.events.push(Write(addr, value));
    }

    fn tick(&mut self) {
        self.events.push(Tick);
    }
}

/// Builds a CPU with `program` at 0x8000 and an empty event log
fn setup_cpu(program: &[u8]) -> CPU<RecordingBus> {
    let mut bus = RecordingBus::new();
    bus.memory[0x8000..0x8000 + program.len()].copy_from_slice(program);
    let mut cpu = CPU::new(bus);
    cpu.memory_mut().events.clear();
    cpu
}

fn assert_each_access_ticked(events: &[Event]) {
    for (i, event) in events.iter().enumerate() {
        if matches!(event, Read(..) | Write(..)) {
            assert_eq!(events.get(i + 1), Some(&Tick), "event {} in {:?}", i, events);
        }
    }
}

// ========== Reset ==========

#[test]
fn test_reset_sequence() {
    let cpu = CPU::new(RecordingBus::new());

    assert_eq!(
        cpu.memory().events,
        [
            Tick,
            Tick,
            Tick,
            Tick,
            Tick,
            Read(0xFFFC, 0x00),
            Tick,
            Read(0xFFFD, 0x80),
            Tick,
        ]
    );
}

// ========== Instructions ==========

#[test]
fn test_jsr_sequence() {
    let mut cpu = setup_cpu(&[0x20, 0x34, 0x12]);

    assert_eq!(cpu.step(), Ok(6));

    assert_eq!(
        cpu.memory().events,
        [
            Read(0x8000, 0x20),
            Tick,
            Read(0x8001, 0x34),
            Tick,
            Tick,
            Write(0x01FD, 0x80),
            Tick,
            Write(0x01FC, 0x02),
            Tick,
            Read(0x8002, 0x12),
            Tick,
        ]
    );
}

#[test]
fn test_inc_zero_page_sequence() {
    let mut cpu = setup_cpu(&[0xE6, 0x10]);
    cpu.memory_mut().memory[0x0010] = 0x41;

    assert_eq!(cpu.step(), Ok(5));

    assert_eq!(
        cpu.memory().events,
        [
            Read(0x8000, 0xE6),
            Tick,
            Read(0x8001, 0x10),
            Tick,
            Read(0x0010, 0x41),
            Tick,
            Tick,
            Write(0x0010, 0x42),
            Tick,
        ]
    );
}

#[test]
fn test_sta_absolute_x_pays_index_cycle() {
    let mut cpu = setup_cpu(&[0x9D, 0x00, 0x20]);
    cpu.set_a(0x99);
    cpu.set_x(0x05);

    assert_eq!(cpu.step(), Ok(5));

    assert_eq!(
        cpu.memory().events,
        [
            Read(0x8000, 0x9D),
            Tick,
            Read(0x8001, 0x00),
            Tick,
            Read(0x8002, 0x20),
            Tick,
            Tick,
            Write(0x2005, 0x99),
            Tick,
        ]
    );
}

#[test]
fn test_lda_absolute_x_same_page_skips_index_cycle() {
    let mut cpu = setup_cpu(&[0xBD, 0x00, 0x20]);
    cpu.set_x(0x05);

    assert_eq!(cpu.step(), Ok(4));

    assert_eq!(
        cpu.memory().events,
        [
            Read(0x8000, 0xBD),
            Tick,
            Read(0x8001, 0x00),
            Tick,
            Read(0x8002, 0x20),
            Tick,
            Read(0x2005, 0x00),
            Tick,
        ]
    );
}

#[test]
fn test_nmi_entry_sequence() {
    let mut cpu = setup_cpu(&[0xEA]);
    cpu.memory_mut().memory[0xFFFA] = 0x00;
    cpu.memory_mut().memory[0xFFFB] = 0x90;
    cpu.request_nmi();

    assert_eq!(cpu.step(), Ok(7));

    assert_eq!(
        cpu.memory().events,
        [
            Tick,
            Tick,
            Write(0x01FD, 0x80),
            Tick,
            Write(0x01FC, 0x00),
            Tick,
            Write(0x01FB, 0x24),
            Tick,
            Read(0xFFFA, 0x00),
            Tick,
            Read(0xFFFB, 0x90),
            Tick,
        ]
    );
}

// ========== Every Opcode ==========

#[test]
fn test_every_access_followed_by_tick() {
    let config = CpuConfig::default().with_undefined_opcodes(UndefinedOpcodePolicy::Nmos);

    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if metadata.mnemonic.is_unstable() {
            continue;
        }

        let mut bus = RecordingBus::new();
        bus.memory[0x8000] = opcode as u8;
        bus.memory[0x8001] = 0xFF;
        bus.memory[0x8002] = 0x20;
        let mut cpu = CPU::with_config(bus, config);
        cpu.set_x(0x01);
        cpu.set_y(0x01);
        cpu.memory_mut().events.clear();

        let result = cpu.step();
        let events = &cpu.memory().events;
        let ticks = events.iter().filter(|e| **e == Tick).count() as u64;

        assert_each_access_ticked(events);
        if let Ok(cycles) = result {
            assert_eq!(ticks, cycles, "opcode {:#04X}", opcode);
        }
    }
}
