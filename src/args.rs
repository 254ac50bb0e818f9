use std::error::Error;
use std::path::PathBuf;

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    command_name: String,
}

impl ArgParser {
    pub fn new(args: Vec<String>, command_name: &str) -> Self {
        Self { iter: args.into_iter(), command_name: command_name.to_string() }
    }

    /// Extract a string value for a flag
    pub fn extract_value(
        &mut self,
        flag: &str,
    ) -> Result<String, Box<dyn Error>> {
        self.iter.next().ok_or_else(|| {
            format!("Provide a value after {} for {}", flag, self.command_name)
                .into()
        })
    }

    /// Get next argument
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.iter.next()
    }

    fn unexpected(&self, arg: &str) -> Box<dyn Error> {
        format!("Unknown argument for {}: {}", self.command_name, arg).into()
    }
}

/// Flags accepted by `new` and `colors`
#[derive(Default, Debug, PartialEq)]
pub struct SessionFlags {
    pub plain: bool,
    pub script: Option<PathBuf>,
}

impl SessionFlags {
    pub fn parse(
        args: Vec<String>,
        command_name: &str,
        allow_script: bool,
    ) -> Result<Self, Box<dyn Error>> {
        let mut parser = ArgParser::new(args, command_name);
        let mut flags = SessionFlags::default();
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "--plain" => flags.plain = true,
                "--script" | "-s" if allow_script => {
                    let path = parser.extract_value(&arg)?;
                    flags.script = Some(PathBuf::from(path));
                }
                other => return Err(parser.unexpected(other)),
            }
        }
        Ok(flags)
    }
}
