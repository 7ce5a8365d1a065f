use hoc::mach::{Event, Runtime};

/// Enters `input` and collects printed output and error lines, in order.
/// A statement still waiting for more input shows as `...`.
pub fn exec(runtime: &mut Runtime, input: &str) -> String {
    let mut s = String::new();
    for event in runtime.enter(input) {
        match &event {
            Event::Print(ps) => {
                s.push_str(ps);
            }
            Event::Errors(errors) => {
                for error in errors.iter() {
                    s.push_str(&format!("{}\n", error));
                }
            }
            Event::Incomplete => {
                s.push_str("...\n");
            }
        }
    }
    s
}
