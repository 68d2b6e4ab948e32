//! WASM API for the 6502 emulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, interrupt
//! injection and state inspection over a flat 64KB memory.

use crate::{CpuConfig, ExecutionError, FlatMemory, MemoryBus, UndefinedOpcodePolicy, CPU};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<ExecutionError> for JsError {
    fn from(err: ExecutionError) -> Self {
        JsError::new(&err.to_string())
    }
}

#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: CPU<FlatMemory>,
    program_start: u16,
    program_end: u16,
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Create a new emulator with zeroed memory.
    ///
    /// With `undocumented` set, the stable NMOS undocumented opcodes execute
    /// instead of stopping the program.
    #[wasm_bindgen(constructor)]
    pub fn new(undocumented: bool) -> Self {
        let policy = if undocumented {
            UndefinedOpcodePolicy::Nmos
        } else {
            UndefinedOpcodePolicy::Fail
        };
        let config = CpuConfig::default().with_undefined_opcodes(policy);

        Emulator6502 {
            cpu: CPU::with_config(FlatMemory::new(), config),
            program_start: 0,
            program_end: 0,
        }
    }

    /// Execute a single instruction, returning the cycles it took
    pub fn step(&mut self) -> Result<u32, JsError> {
        Ok(self.cpu.step()? as u32)
    }

    /// Execute instructions for at least `cycles` cycles
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        Ok(self.cpu.run_for_cycles(cycles as u64)? as u32)
    }

    /// Run the reset sequence; PC is loaded from the reset vector
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Latch a non-maskable interrupt
    pub fn nmi(&mut self) {
        self.cpu.request_nmi();
    }

    /// Drive the IRQ line
    pub fn set_irq(&mut self, active: bool) {
        self.cpu.set_irq_line(active);
    }

    // Register getters

    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    /// Total cycles (f64 since JavaScript numbers can't hold a full u64)
    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn jammed(&self) -> bool {
        self.cpu.is_jammed()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_n(&self) -> bool {
        self.cpu.flag_n()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_v(&self) -> bool {
        self.cpu.flag_v()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_d(&self) -> bool {
        self.cpu.flag_d()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_i(&self) -> bool {
        self.cpu.flag_i()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.cpu.flag_z()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_c(&self) -> bool {
        self.cpu.flag_c()
    }

    // Register setters

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    // Memory access methods

    /// Read a single byte from memory (no side effects, no cycles)
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().peek(addr)
    }

    /// Write a single byte to memory
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// Copy of a 256-byte page of memory (for efficient display)
    pub fn memory_page(&self, page: u8) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.cpu.memory().page(page))
    }

    /// Load a program into memory and set PC
    ///
    /// Programs must be smaller than 64KB so that the end address is
    /// distinct from the start.
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) -> Result<(), JsError> {
        let len = u16::try_from(program.len()).map_err(|_| {
            JsError::new(&format!(
                "program is {} bytes, larger than the 64KB address space allows",
                program.len()
            ))
        })?;

        self.cpu.memory_mut().load(start_addr, program);
        self.cpu.set_pc(start_addr);
        self.program_start = start_addr;
        self.program_end = start_addr.wrapping_add(len);
        Ok(())
    }

    /// Get the program start address
    #[wasm_bindgen(getter)]
    pub fn program_start(&self) -> u16 {
        self.program_start
    }

    /// Get the program end address
    #[wasm_bindgen(getter)]
    pub fn program_end(&self) -> u16 {
        self.program_end
    }
}
