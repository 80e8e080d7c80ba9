use serde::Deserialize;

const DEFAULT_LINE_BUFFER: usize = 32;
const DEFAULT_READER_THREAD_NAME: &str = "cmdproc-line-reader";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProcessorConfig {
    /// Lines the reader may queue ahead of the dispatch loop.
    #[serde(default = "default_line_buffer")]
    pub line_buffer: usize,

    /// Printed to stdout before each read when set.
    #[serde(default)]
    pub prompt: Option<String>,

    #[serde(default = "default_color")]
    pub color: bool,

    #[serde(default = "default_reader_thread_name")]
    pub reader_thread_name: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            line_buffer: DEFAULT_LINE_BUFFER,
            prompt: None,
            color: true,
            reader_thread_name: DEFAULT_READER_THREAD_NAME.to_string(),
        }
    }
}

impl ProcessorConfig {
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_line_buffer(mut self, line_buffer: usize) -> Self {
        self.line_buffer = line_buffer;
        self
    }

    /// Channel capacity actually used; tokio rejects a zero-sized channel.
    pub fn effective_line_buffer(&self) -> usize {
        self.line_buffer.max(1)
    }
}

fn default_line_buffer() -> usize {
    DEFAULT_LINE_BUFFER
}

fn default_color() -> bool {
    true
}

fn default_reader_thread_name() -> String {
    DEFAULT_READER_THREAD_NAME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: ProcessorConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ProcessorConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config: ProcessorConfig =
            serde_yaml::from_str("prompt: \"> \"\ncolor: false\nline_buffer: 0\n").unwrap();

        assert_eq!(config.prompt.as_deref(), Some("> "));
        assert!(!config.color);
        assert_eq!(config.effective_line_buffer(), 1);
        assert_eq!(config.reader_thread_name, "cmdproc-line-reader");
    }
}
