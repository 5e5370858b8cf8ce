//! A CHIP-8 interpreter with a terminal front end.
//!
//! ## Design
//!
//! * the interpreter core owns every piece of machine state (RAM,
//!   registers, call stack, timers, framebuffer) and is driven from
//!   outside: the host calls `step()` once per instruction and
//!   `tick_timers()` at 60Hz, then reads the framebuffer back
//! * display and input sit behind traits so the terminal front end
//!   can be swapped for something else without touching the core
//! * nothing in the core may block the host. The one instruction that
//!   conceptually blocks (wait-for-key) parks the machine in a wait
//!   state which `step()` services until a key shows up
//! * anything left undefined by the original machine -- stack misuse,
//!   opcodes with no defined meaning, addressing past the end of RAM,
//!   oversized program images -- is a typed fatal error rather than a
//!   panic or a silent no-op. The host decides what to do with it
//!
//! Model
//!
//! main loop
//!  |-- input(keymap) --> key states --> interpreter
//!  |-- interpreter.step() x instructions-per-frame
//!  |-- interpreter.tick_timers()
//!  `-- display.draw(interpreter.framebuffer())
pub mod display;
pub mod input;
pub mod interpreter;
pub mod memory;

use std::io;

/// Fatal interpreter faults. Every variant stops the instruction
/// stream; execution is deterministic so none of them is retryable.
#[derive(Debug, thiserror::Error)]
pub enum Chip8Error {
    /// decode hit a bit pattern with no defined meaning
    #[error("unknown opcode {opcode:#06x} at {address:#05x}")]
    UnknownOpcode { opcode: u16, address: u16 },

    /// program image doesn't fit between the program address and the
    /// end of RAM
    #[error("program is {size} bytes but at most {max} fit in RAM")]
    ProgramTooLarge { size: usize, max: usize },

    /// seventeenth nested subroutine call
    #[error("call stack overflow")]
    StackOverflow,

    /// return with no caller on the stack
    #[error("return from subroutine with an empty call stack")]
    StackUnderflow,

    /// an instruction addressed memory past the end of RAM
    #[error("memory access out of bounds at {address:#05x}")]
    MemoryOutOfBounds { address: u16 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
