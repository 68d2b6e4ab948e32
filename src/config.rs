//! # CPU Configuration
//!
//! Chip-revision choices that the instruction set alone does not pin down:
//! what to do with undefined opcodes, whether the Decimal flag changes
//! ADC/SBC, and which Break bit value an IRQ pushes.
//!
//! ```
//! use lib6502::{CpuConfig, DecimalMode, UndefinedOpcodePolicy};
//!
//! let config = CpuConfig::default()
//!     .with_undefined_opcodes(UndefinedOpcodePolicy::Nmos)
//!     .with_decimal_mode(DecimalMode::Disabled);
//!
//! assert_eq!(config, CpuConfig::ricoh_2a03());
//! ```

/// What the CPU does when it fetches an opcode with no documented mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndefinedOpcodePolicy {
    /// Stop with `ExecutionError::UnimplementedOpcode`, leaving PC on the opcode.
    #[default]
    Fail,

    /// Execute the stable NMOS undocumented opcodes (LAX, SAX, DCP, ISC, SLO,
    /// RLA, SRE, RRA, ANC, ALR, ARR, SBX, NOP variants, JAM). The unstable
    /// ones still fail.
    Nmos,
}

/// How ADC and SBC treat the Decimal flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalMode {
    /// Bit-exact NMOS 6502 BCD arithmetic, including its flag quirks.
    #[default]
    Nmos,

    /// The flag is stored but ignored (Ricoh 2A03).
    Disabled,
}

/// Configuration for a `CPU` instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuConfig {
    /// Undefined-opcode handling.
    pub undefined_opcodes: UndefinedOpcodePolicy,

    /// Decimal-mode handling for ADC/SBC.
    pub decimal_mode: DecimalMode,

    /// Push the Break bit set on IRQ entry, as BRK does.
    ///
    /// On by default. NMOS silicon pushes it clear for both IRQ and NMI;
    /// turn this off to match it bit for bit.
    pub irq_pushes_break: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self::nmos()
    }
}

impl CpuConfig {
    /// Stock NMOS 6502: undefined opcodes fail, full BCD, IRQ pushes B set.
    pub const fn nmos() -> Self {
        Self {
            undefined_opcodes: UndefinedOpcodePolicy::Fail,
            decimal_mode: DecimalMode::Nmos,
            irq_pushes_break: true,
        }
    }

    /// Ricoh 2A03 (NES): no decimal mode, undocumented opcodes behave as on NMOS.
    pub const fn ricoh_2a03() -> Self {
        Self {
            undefined_opcodes: UndefinedOpcodePolicy::Nmos,
            decimal_mode: DecimalMode::Disabled,
            irq_pushes_break: true,
        }
    }

    /// Replaces the undefined-opcode policy.
    pub const fn with_undefined_opcodes(mut self, policy: UndefinedOpcodePolicy) -> Self {
        self.undefined_opcodes = policy;
        self
    }

    /// Replaces the decimal-mode policy.
    pub const fn with_decimal_mode(mut self, mode: DecimalMode) -> Self {
        self.decimal_mode = mode;
        self
    }

    /// Selects the Break bit pushed on IRQ entry. `false` matches NMOS silicon.
    pub const fn with_irq_pushes_break(mut self, enabled: bool) -> Self {
        self.irq_pushes_break = enabled;
        self
    }
}
