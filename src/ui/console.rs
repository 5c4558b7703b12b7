use std::io;

/// Terminal seam so tests can script the whole front.
pub trait Console {
    fn print_line(&mut self, line: &str) -> io::Result<()>;
    /// Returns `None` on EOF.
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

pub struct StdConsole;

impl Console for StdConsole {
    fn print_line(&mut self, line: &str) -> io::Result<()> {
        println!("{line}");
        Ok(())
    }

    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        use std::io::Write;

        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes = io::stdin().read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_owned()))
    }
}

#[cfg(test)]
pub mod fake {
    use std::collections::VecDeque;
    use std::io;

    use super::Console;

    /// Scripted console: pops inputs front-to-back, records every printed
    /// line for assertions.
    pub struct FakeConsole {
        inputs: VecDeque<Option<String>>,
        pub output: Vec<String>,
    }

    impl FakeConsole {
        pub fn new(inputs: Vec<Option<&str>>) -> Self {
            Self {
                inputs: inputs
                    .into_iter()
                    .map(|item| item.map(|value| value.to_owned()))
                    .collect(),
                output: Vec::new(),
            }
        }

        pub fn printed(&self, needle: &str) -> bool {
            self.output.iter().any(|line| line.contains(needle))
        }
    }

    impl Console for FakeConsole {
        fn print_line(&mut self, line: &str) -> io::Result<()> {
            self.output.push(line.to_owned());
            Ok(())
        }

        fn prompt_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
            Ok(self.inputs.pop_front().flatten())
        }
    }
}
