#![allow(clippy::struct_excessive_bools)]

/// Configuration options for [`YamlParser`](crate::YamlParser).
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserOptions {
    /// Whether floating point scalars are materialized as
    /// [`Token::ValueNumberBigDecimal`](crate::Token::ValueNumberBigDecimal)
    /// instead of `f64`.
    ///
    /// Individual values can always be read at full precision through
    /// [`YamlParser::decimal_value`](crate::YamlParser::decimal_value).
    ///
    /// # Default
    ///
    /// `false`
    pub decimal_floats: bool,
}

/// Configuration options for [`YamlGenerator`](crate::YamlGenerator).
///
/// Read once when the generator is constructed.
///
/// # Examples
///
/// ```rust
/// use yamlmodem::{EventRecorder, GeneratorOptions, YamlGenerator};
///
/// let options = GeneratorOptions {
///     canonical_output: true,
///     ..Default::default()
/// };
/// let generator = YamlGenerator::new(EventRecorder::new(), options).unwrap();
/// assert!(generator.can_write_object_id());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorOptions {
    /// Whether the document start event asks for an explicit `---` marker.
    ///
    /// # Default
    ///
    /// `true`
    pub write_doc_start_marker: bool,

    /// Whether object ids are written natively as anchors and aliases.
    ///
    /// When `false`, callers are expected to write ids as ordinary properties.
    ///
    /// # Default
    ///
    /// `true`
    pub use_native_object_id: bool,

    /// Whether type ids are written natively as tags.
    ///
    /// When `false`, callers are expected to write type ids as ordinary
    /// properties.
    ///
    /// # Default
    ///
    /// `true`
    pub use_native_type_id: bool,

    /// Whether the engine renders canonical output. Collections are emitted in
    /// flow style when enabled.
    ///
    /// # Default
    ///
    /// `false`
    pub canonical_output: bool,

    /// Whether the engine may split long scalars over several lines.
    ///
    /// # Default
    ///
    /// `true`
    pub split_lines: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            write_doc_start_marker: true,
            use_native_object_id: true,
            use_native_type_id: true,
            canonical_output: false,
            split_lines: true,
        }
    }
}

/// Individually togglable generator features, mirroring the fields of
/// [`GeneratorOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeneratorFeature {
    WriteDocStartMarker,
    UseNativeObjectId,
    UseNativeTypeId,
    CanonicalOutput,
    SplitLines,
}

impl GeneratorFeature {
    /// Every feature, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::WriteDocStartMarker,
        Self::UseNativeObjectId,
        Self::UseNativeTypeId,
        Self::CanonicalOutput,
        Self::SplitLines,
    ];

    #[must_use]
    pub fn enabled_by_default(self) -> bool {
        GeneratorOptions::default().is_enabled(self)
    }
}

impl GeneratorOptions {
    fn flag_mut(&mut self, feature: GeneratorFeature) -> &mut bool {
        match feature {
            GeneratorFeature::WriteDocStartMarker => &mut self.write_doc_start_marker,
            GeneratorFeature::UseNativeObjectId => &mut self.use_native_object_id,
            GeneratorFeature::UseNativeTypeId => &mut self.use_native_type_id,
            GeneratorFeature::CanonicalOutput => &mut self.canonical_output,
            GeneratorFeature::SplitLines => &mut self.split_lines,
        }
    }

    #[must_use]
    pub fn is_enabled(&self, feature: GeneratorFeature) -> bool {
        match feature {
            GeneratorFeature::WriteDocStartMarker => self.write_doc_start_marker,
            GeneratorFeature::UseNativeObjectId => self.use_native_object_id,
            GeneratorFeature::UseNativeTypeId => self.use_native_type_id,
            GeneratorFeature::CanonicalOutput => self.canonical_output,
            GeneratorFeature::SplitLines => self.split_lines,
        }
    }

    #[must_use]
    pub fn configure(mut self, feature: GeneratorFeature, state: bool) -> Self {
        *self.flag_mut(feature) = state;
        self
    }

    #[must_use]
    pub fn enable(self, feature: GeneratorFeature) -> Self {
        self.configure(feature, true)
    }

    #[must_use]
    pub fn disable(self, feature: GeneratorFeature) -> Self {
        self.configure(feature, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_defaults() {
        let enabled: alloc::vec::Vec<_> = GeneratorFeature::ALL
            .into_iter()
            .filter(|f| f.enabled_by_default())
            .collect();
        assert_eq!(
            enabled,
            [
                GeneratorFeature::WriteDocStartMarker,
                GeneratorFeature::UseNativeObjectId,
                GeneratorFeature::UseNativeTypeId,
                GeneratorFeature::SplitLines,
            ]
        );
    }

    #[test]
    fn configure_round_trips_every_flag() {
        for feature in GeneratorFeature::ALL {
            let on = GeneratorOptions::default().enable(feature);
            let off = GeneratorOptions::default().disable(feature);
            assert!(on.is_enabled(feature));
            assert!(!off.is_enabled(feature));
            // the other four flags are untouched
            for other in GeneratorFeature::ALL.into_iter().filter(|f| *f != feature) {
                assert_eq!(on.is_enabled(other), other.enabled_by_default());
                assert_eq!(off.is_enabled(other), other.enabled_by_default());
            }
        }
    }
}
