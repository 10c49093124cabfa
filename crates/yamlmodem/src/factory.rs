use crate::{
    error::GeneratorError,
    event::{EventSink, EventSource},
    generator::YamlGenerator,
    options::{GeneratorFeature, GeneratorOptions, ParserOptions},
    parser::YamlParser,
};

/// Name of the data format produced and consumed.
pub const FORMAT_NAME: &str = "YAML";

/// Crate version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates parsers and generators sharing one configuration.
///
/// ```rust
/// use yamlmodem::{EventQueue, EventRecorder, GeneratorFeature, YamlFactory};
///
/// let factory = YamlFactory::new().configure(GeneratorFeature::WriteDocStartMarker, false);
/// let generator = factory.create_generator(EventRecorder::new()).unwrap();
/// assert!(!generator.options().write_doc_start_marker);
///
/// let parser = factory.create_parser(EventQueue::new());
/// assert!(!parser.options().decimal_floats);
/// assert_eq!(factory.format_name(), "YAML");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YamlFactory {
    parser_options: ParserOptions,
    generator_options: GeneratorOptions,
}

impl YamlFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_parser_options(mut self, options: ParserOptions) -> Self {
        self.parser_options = options;
        self
    }

    #[must_use]
    pub fn with_generator_options(mut self, options: GeneratorOptions) -> Self {
        self.generator_options = options;
        self
    }

    /// Turns a generator feature on or off for generators created afterwards.
    #[must_use]
    pub fn configure(mut self, feature: GeneratorFeature, state: bool) -> Self {
        self.generator_options = self.generator_options.configure(feature, state);
        self
    }

    #[must_use]
    pub fn is_enabled(&self, feature: GeneratorFeature) -> bool {
        self.generator_options.is_enabled(feature)
    }

    #[must_use]
    pub fn parser_options(&self) -> &ParserOptions {
        &self.parser_options
    }

    #[must_use]
    pub fn generator_options(&self) -> &GeneratorOptions {
        &self.generator_options
    }

    pub fn create_parser<S: EventSource>(&self, source: S) -> YamlParser<S> {
        YamlParser::new(source, self.parser_options)
    }

    /// # Errors
    ///
    /// Returns the sink's error when the opening events cannot be emitted.
    pub fn create_generator<S: EventSink>(
        &self,
        sink: S,
    ) -> Result<YamlGenerator<S>, GeneratorError<S::Error>> {
        YamlGenerator::new(sink, self.generator_options)
    }

    #[must_use]
    pub fn format_name(&self) -> &'static str {
        FORMAT_NAME
    }

    #[must_use]
    pub fn version(&self) -> &'static str {
        VERSION
    }
}
