extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::error;
use crate::mach::{Config, Event, Runtime};
use ansi_term::Style;
use linefeed::{Interface, ReadResult, Signal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const PROMPT: &str = "hoc> ";
const CONTINUE: &str = "...> ";

/// Command line: `hoc [--trace] [file ...]`. With no files
/// an interactive session is started.
pub fn main() {
    let mut config = Config::default();
    let mut files = vec![];
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--trace" => config.trace = true,
            _ => files.push(arg),
        }
    }
    let mut runtime = Runtime::with_config(config);
    let interrupted = runtime.interrupt_handle();
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("{}", error);
    }
    let result = if files.is_empty() {
        main_loop(&mut runtime, interrupted)
    } else {
        run_files(&mut runtime, &files)
    };
    if let Err(error) = result {
        eprintln!("{}", error);
    }
}

fn main_loop(runtime: &mut Runtime, interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let interface = Interface::new("hoc")?;
    interface.set_report_signal(Signal::Interrupt, true);
    interface.set_prompt(PROMPT)?;
    let mut entry = String::new();

    loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
        };
        let string = match interface.read_line()? {
            ReadResult::Input(string) => string,
            ReadResult::Signal(Signal::Interrupt) => {
                interface.set_buffer("")?;
                interface.lock_reader().cancel_read_line()?;
                runtime.interrupt();
                entry.clear();
                interface.set_prompt(PROMPT)?;
                continue;
            }
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        if !entry.is_empty() {
            entry.push('\n');
        }
        entry.push_str(&string);
        let mut incomplete = false;
        for event in runtime.enter(&string) {
            match event {
                Event::Incomplete => incomplete = true,
                event => interface.write_fmt(format_args!("{}", render(&event)))?,
            }
        }
        if incomplete {
            interface.set_prompt(CONTINUE)?;
        } else {
            if !entry.trim().is_empty() {
                interface.add_history_unique(std::mem::take(&mut entry));
            }
            entry.clear();
            interface.set_prompt(PROMPT)?;
        }
    }
    Ok(())
}

fn run_files(runtime: &mut Runtime, files: &[String]) -> std::io::Result<()> {
    for filename in files {
        let source = match std::fs::read_to_string(filename) {
            Ok(source) => source,
            Err(error) => {
                let error = error!(InternalError; &format!("{}: {}", filename, error));
                eprint!("{}", render(&Event::Errors(vec![error])));
                continue;
            }
        };
        for event in runtime.enter(&source) {
            print!("{}", render(&event));
        }
        if runtime.is_pending() {
            runtime.interrupt();
            eprint!("{}", render(&Event::Errors(vec![error!(Incomplete)])));
        }
    }
    Ok(())
}

fn render(event: &Event) -> String {
    match event {
        Event::Print(s) => s.clone(),
        Event::Errors(errors) => errors
            .iter()
            .map(|error| format!("{}\n", Style::new().bold().paint(error.to_string())))
            .collect(),
        Event::Incomplete => String::new(),
    }
}
