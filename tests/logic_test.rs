//! Tests for the logical instructions (AND, ORA, EOR, BIT) and compares.
//!
//! Tests cover:
//! - Accumulator results and N/Z flags
//! - BIT copying bits 7 and 6 of memory into N and V
//! - CMP/CPX/CPY carry, zero and negative semantics

use lib6502::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

// ========== AND / ORA / EOR ==========

#[test]
fn test_and_immediate() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x29, 0x0F]);
    cpu.set_a(0xF3);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.a(), 0x03);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_and_to_zero() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x25, 0x10]);
    cpu.memory_mut().write(0x0010, 0xF0);
    cpu.set_a(0x0F);

    assert_eq!(cpu.step(), Ok(3));
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_ora_sets_negative() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x09, 0x80]);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(cpu.flag_n());
}

#[test]
fn test_eor_indirect_indexed() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x51, 0x20]);
    cpu.memory_mut().load(0x0020, &[0x00, 0x30]);
    cpu.memory_mut().write(0x3002, 0xFF);
    cpu.set_a(0xAA);
    cpu.set_y(0x02);

    assert_eq!(cpu.step(), Ok(5));
    assert_eq!(cpu.a(), 0x55);
}

// ========== BIT ==========

#[test]
fn test_bit_copies_high_bits() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x24, 0x10]);
    cpu.memory_mut().write(0x0010, 0xC0);
    cpu.set_a(0x01);

    assert_eq!(cpu.step(), Ok(3));
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_z());
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn test_bit_absolute_clears_flags() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x2C, 0x00, 0x20]);
    cpu.memory_mut().write(0x2000, 0x01);
    cpu.set_a(0x01);
    cpu.set_flag_n(true);
    cpu.set_flag_v(true);

    assert_eq!(cpu.step(), Ok(4));
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_z());
}

// ========== Compares ==========

#[test]
fn test_cmp_equal() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xC9, 0x42]);
    cpu.set_a(0x42);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_less_than() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xC9, 0x50]);
    cpu.set_a(0x40);

    cpu.step().unwrap();

    assert!(!cpu.flag_z());
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert_eq!(cpu.a(), 0x40);
}

#[test]
fn test_cpx_greater_than() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xE0, 0x10]);
    cpu.set_x(0x20);

    cpu.step().unwrap();

    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cpy_absolute() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xCC, 0x00, 0x02]);
    cpu.memory_mut().write(0x0200, 0xFF);
    cpu.set_y(0x00);

    assert_eq!(cpu.step(), Ok(4));
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    // 0x00 - 0xFF = 0x01
    assert!(!cpu.flag_n());
}
