use crate::{
    convert::{RasterOptions, Rasterizer, Unwrap, to_mask, to_roi},
    registry::ConverterRegistry,
    traits::Converter,
};

/// Builder for converter registries with a fluent API
///
/// The rasterization fallback is always placed after every other rule.
pub struct RegistryBuilder {
    converters: Vec<Box<dyn Converter>>,
    rasterization: Option<RasterOptions>,
}

impl RegistryBuilder {
    /// Empty builder with default rasterization enabled
    pub fn new() -> Self {
        Self {
            converters: Vec::new(),
            rasterization: Some(RasterOptions::default()),
        }
    }

    /// Append a rule; earlier rules win ties within a priority class
    pub fn register<C>(mut self, converter: C) -> Self
    where
        C: Converter + 'static,
    {
        self.converters.push(Box::new(converter));
        self
    }

    /// Append the unwrap rules, then legacy-to-mask, then mask-to-legacy
    pub fn with_standard_converters(mut self) -> Self {
        self.converters
            .extend(Unwrap::all().into_iter().map(|u| Box::new(u) as Box<dyn Converter>));
        self.converters.extend(to_mask::standard());
        self.converters.extend(to_roi::standard());
        self
    }

    /// Rasterize with the given options
    pub fn with_rasterization(mut self, options: RasterOptions) -> Self {
        self.rasterization = Some(options);
        self
    }

    /// Drop the rasterization fallback
    pub fn without_rasterization(mut self) -> Self {
        self.rasterization = None;
        self
    }

    pub fn build(self) -> ConverterRegistry {
        let mut converters = self.converters;
        if let Some(options) = self.rasterization {
            converters.push(Box::new(Rasterizer::new(options)));
        }
        ConverterRegistry::new(converters)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{Capability, Convertible, Priority};
    use crate::error::Result;

    #[derive(Debug)]
    struct Refuse;

    impl Converter for Refuse {
        fn name(&self) -> &'static str {
            "refuse"
        }

        fn input(&self) -> Capability {
            Capability::Mask
        }

        fn output(&self) -> Capability {
            Capability::RectangleRoi
        }

        fn priority(&self) -> Priority {
            Priority::Structural
        }

        fn supports(&self, _value: &Convertible) -> bool {
            false
        }

        fn convert(&self, _value: &Convertible) -> Result<Convertible> {
            unreachable!("guard never passes")
        }
    }

    #[test]
    fn test_custom_rules_precede_rasterization() {
        let registry = RegistryBuilder::new().register(Refuse).build();
        let names: Vec<_> = registry.converters().map(|c| c.name()).collect();
        assert_eq!(names, vec!["refuse", "rasterize"]);
    }

    #[test]
    fn test_rasterization_options_are_kept() {
        let options = RasterOptions {
            foreground: 1,
            ..RasterOptions::default()
        };
        let registry = RegistryBuilder::new().with_rasterization(options).build();
        assert_eq!(registry.len(), 1);
        assert!(RegistryBuilder::new().without_rasterization().build().is_empty());
    }

    #[test]
    fn test_info_lists_rules() {
        let info = ConverterRegistry::standard().info();
        assert!(info.starts_with("ConverterRegistry: 20 rules (6 lossy)"));
        assert!(info.contains("oval_to_ellipsoid"));
    }
}
