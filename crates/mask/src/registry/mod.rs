pub mod builder;

use tracing::{debug, trace};

use crate::{
    convert::{Capability, Convertible},
    error::{MaskError, Result},
    traits::Converter,
};

pub use builder::RegistryBuilder;

/// Ordered set of conversion rules with best-match dispatch.
///
/// Rules are fixed once the registry is built. For a value and a target
/// capability the registry keeps the rules whose output satisfies the
/// target, whose input the value provides and whose guard accepts the
/// value, then picks the best by priority: unwrap, lossless structural,
/// lossy structural, rasterization. Ties go to the rule registered first.
pub struct ConverterRegistry {
    converters: Vec<Box<dyn Converter>>,
}

impl ConverterRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn new(converters: Vec<Box<dyn Converter>>) -> Self {
        Self { converters }
    }

    /// Every standard rule plus the default rasterization fallback.
    pub fn standard() -> Self {
        RegistryBuilder::new().with_standard_converters().build()
    }

    /// Rules in registration order.
    pub fn converters(&self) -> impl Iterator<Item = &dyn Converter> {
        self.converters.iter().map(|c| c.as_ref() as &dyn Converter)
    }

    /// Rules producing something usable as `target`, in registration order.
    pub fn converters_for(&self, target: Capability) -> impl Iterator<Item = &dyn Converter> {
        self.converters().filter(move |c| c.output().satisfies(target))
    }

    /// Best applicable rule, or `None` when no rule accepts `value`.
    pub fn find_converter(&self, value: &Convertible, target: Capability) -> Option<&dyn Converter> {
        let mut best: Option<&dyn Converter> = None;
        let mut candidates = 0usize;

        for converter in self.converters_for(target) {
            candidates += 1;
            if !value.provides(converter.input()) {
                trace!(rule = converter.name(), input = %converter.input(), "input not provided");
                continue;
            }
            if !converter.supports(value) {
                trace!(rule = converter.name(), "rejected by guard");
                continue;
            }
            if best.is_none_or(|b| rank(converter) < rank(b)) {
                best = Some(converter);
            }
        }

        debug!(
            source = %value.capability(),
            target = %target,
            candidates,
            chosen = ?best.map(|c| c.name()),
            "dispatch"
        );
        best
    }

    /// Convert with the best applicable rule.
    ///
    /// `Ok(None)` means no rule applies. An error means the chosen rule
    /// failed.
    pub fn convert(&self, value: &Convertible, target: Capability) -> Result<Option<Convertible>> {
        self.find_converter(value, target)
            .map(|converter| converter.convert(value))
            .transpose()
    }

    /// Like [`ConverterRegistry::convert`], with a missing rule reported as
    /// [`MaskError::NoApplicableConverter`].
    pub fn convert_or_err(&self, value: &Convertible, target: Capability) -> Result<Convertible> {
        self.convert(value, target)?
            .ok_or(MaskError::NoApplicableConverter { target })
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Get information about the registry configuration
    pub fn info(&self) -> String {
        let lossy = self.converters.iter().filter(|c| c.is_lossy()).count();
        format!(
            "ConverterRegistry: {} rules ({} lossy): {}",
            self.converters.len(),
            lossy,
            self.converters()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn rank(converter: &dyn Converter) -> u8 {
    converter.priority().rank(converter.is_lossy())
}
