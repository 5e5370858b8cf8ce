use std::env;
use std::error::Error;
use std::fs::File;
use std::time::{Duration, Instant};

use chirp8::display::{Display, MonoTermDisplay};
use chirp8::input::{Input, TermInput};
use chirp8::interpreter::{Chip8Interpreter, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// display refresh and timer rate
const FRAME_RATE: u32 = 60;

/// conventional interpreter speed; chip-8 programs are tuned for
/// roughly this many instructions per second
const INSTRUCTIONS_PER_SECOND: u32 = 700;

fn main() -> Result<(), Box<dyn Error>> {
    let rom_path = env::args()
        .nth(1)
        .ok_or("usage: chirp8 <program.ch8>")?;

    // initialise
    let mut display = MonoTermDisplay::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)?;
    let mut input = TermInput::new()?;
    let mut interpreter = Chip8Interpreter::new();

    // load a program
    let mut f = File::open(&rom_path)?;
    interpreter.load_program(&mut f)?;

    let frame_duration = Duration::from_secs_f64(1.0 / FRAME_RATE as f64);
    let steps_per_frame = INSTRUCTIONS_PER_SECOND / FRAME_RATE;

    loop {
        let frame_start = Instant::now();

        input.poll_keys()?;
        if input.quit_requested() {
            break;
        }
        interpreter.set_keys(input.keys());

        for _ in 0..steps_per_frame {
            interpreter.step()?;
        }
        interpreter.tick_timers();

        display.draw(interpreter.framebuffer())?;

        if let Some(remainder) = frame_duration.checked_sub(frame_start.elapsed()) {
            spin_sleep::sleep(remainder);
        }
    }

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..12 {
        println!();
    }
    Ok(())
}
