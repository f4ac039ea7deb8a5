//! Output built-ins

use crate::error::Result;
use crate::runtime::Value;
use crate::tools::Tool;

/// Formats a `println` line: values in decimal, separated by single spaces
pub fn format_line(args: &[Value]) -> String {
    args.iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// println - hand all arguments to the output sink
///
/// Accepts any number of arguments and yields no value.
pub struct Println {
    sink: Box<dyn Fn(&[Value])>,
}

impl Println {
    /// Sends every call's arguments to `sink`
    pub fn new(sink: impl Fn(&[Value]) + 'static) -> Self {
        Println {
            sink: Box::new(sink),
        }
    }

    /// Prints one line per call to stdout
    pub fn stdout() -> Self {
        Println::new(|args| println!("{}", format_line(args)))
    }
}

impl Tool for Println {
    fn name(&self) -> &str {
        "println"
    }

    fn description(&self) -> &str {
        "Print all arguments on one line"
    }

    fn execute(&self, args: &[Value]) -> Result<Option<Value>> {
        (self.sink)(args);
        Ok(None)
    }
}
