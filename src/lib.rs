//! # 6502 CPU Emulator Core
//!
//! A cycle-counting NMOS 6502 instruction engine designed for modularity, clarity,
//! and WebAssembly portability.
//!
//! The engine executes one instruction per `step()` against a host-supplied bus.
//! Every memory access goes through the bus and is followed by exactly one
//! `tick()`, and internal cycles are a bare `tick()`, so peripherals observe the
//! same access order and clock count as on real hardware.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib6502::{CPU, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//!
//! // LDA #$42; STA $0200
//! memory.load(0x8000, &[0xA9, 0x42, 0x8D, 0x00, 0x02]);
//!
//! // Initialize CPU - it will load PC from the reset vector
//! let mut cpu = CPU::new(memory);
//!
//! assert_eq!(cpu.step(), Ok(2));
//! assert_eq!(cpu.step(), Ok(4));
//! assert_eq!(cpu.a(), 0x42);
//! assert_eq!(cpu.memory().peek(0x0200), 0x42);
//! ```
//!
//! ## Architecture
//!
//! - **Modularity**: CPU state is separated from memory implementation via the `MemoryBus` trait
//! - **WebAssembly Portability**: No OS dependencies, deterministic execution
//! - **Cycle Accuracy**: The bus sees one tick per hardware clock cycle
//! - **Table-Driven Design**: All opcode metadata in a single source of truth
//!
//! ## Modules
//!
//! - `cpu` - CPU state and execution logic
//! - `memory` - MemoryBus trait and a flat RAM implementation
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing modes and the operand resolver
//! - `interrupts` - Reset, NMI, IRQ and BRK sequencing
//! - `config` - Chip-revision options (undefined opcodes, decimal mode)

pub mod addressing;
pub mod config;
pub mod cpu;
pub mod interrupts;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod status;

// Internal instruction implementations (not part of public API)
mod instructions;

// WebAssembly bindings (only compiled for wasm feature)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::{page_crossed, AddressingMode};
pub(crate) use addressing::{Access, Operand};
pub use config::{CpuConfig, DecimalMode, UndefinedOpcodePolicy};
pub use cpu::CPU;
pub use interrupts::{Interrupt, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use registers::Registers;
pub use status::Status;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The opcode is undefined and the configured policy does not execute it.
    ///
    /// PC is left pointing at the opcode.
    #[error("opcode {opcode:#04X} at {pc:#06X} is not implemented")]
    UnimplementedOpcode { opcode: u8, pc: u16 },

    /// A handler was dispatched with an addressing mode it cannot use.
    ///
    /// Only reachable through a malformed opcode table.
    #[error("{mnemonic} does not support {mode:?} addressing")]
    InvalidAddressingMode {
        mnemonic: Mnemonic,
        mode: AddressingMode,
    },

    /// A JAM opcode halted the processor; only `reset()` recovers.
    #[error("processor jammed by opcode {opcode:#04X} at {pc:#06X}")]
    Jammed { opcode: u8, pc: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExecutionError::UnimplementedOpcode {
            opcode: 0x9B,
            pc: 0x8000,
        };
        assert_eq!(err.to_string(), "opcode 0x9B at 0x8000 is not implemented");

        let err = ExecutionError::InvalidAddressingMode {
            mnemonic: Mnemonic::Sta,
            mode: AddressingMode::Immediate,
        };
        assert_eq!(err.to_string(), "STA does not support Immediate addressing");
    }
}
