//! Advisory dependency and naming checks

use std::fmt;

use pexora_module_api::{CORE_IDENTIFIER, MODULE_PREFIX, ModuleDescriptor};

/// A non-blocking validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Neither dependency list names the core
    MissingCoreDependency { module: String, core: String },
    /// Name lacks the reserved prefix
    NamingConvention { module: String, prefix: String },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCoreDependency { module, core } => write!(
                f,
                "Module {module} doesn't declare {core} as a dependency. This may cause issues."
            ),
            Self::NamingConvention { module, prefix } => write!(
                f,
                "Module {module} doesn't follow the naming convention ({prefix}*)."
            ),
        }
    }
}

/// Checks module descriptors for operator-facing hygiene issues.
///
/// Warnings never block activation; the host enforces hard dependencies.
#[derive(Debug, Clone)]
pub struct DependencyValidator {
    core_identifier: String,
    prefix: String,
}

impl Default for DependencyValidator {
    fn default() -> Self {
        Self::new(CORE_IDENTIFIER, MODULE_PREFIX)
    }
}

impl DependencyValidator {
    pub fn new(core_identifier: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            core_identifier: core_identifier.into(),
            prefix: prefix.into(),
        }
    }

    /// Identifier modules are expected to depend on
    pub fn core_identifier(&self) -> &str {
        &self.core_identifier
    }

    /// Reserved name prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn follows_convention(&self, name: &str) -> bool {
        name.starts_with(&self.prefix)
    }

    pub fn validate(&self, descriptor: &ModuleDescriptor) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if !descriptor.declares_dependency_on(&self.core_identifier) {
            warnings.push(ValidationWarning::MissingCoreDependency {
                module: descriptor.name.clone(),
                core: self.core_identifier.clone(),
            });
        }

        if !self.follows_convention(&descriptor.name) {
            warnings.push(ValidationWarning::NamingConvention {
                module: descriptor.name.clone(),
                prefix: self.prefix.clone(),
            });
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compliant_module_has_no_warnings() {
        let validator = DependencyValidator::default();
        let descriptor =
            ModuleDescriptor::new("PexoraChat", "1.0", "PexoraChat.jar").with_depend("PexoraCore");

        assert!(validator.validate(&descriptor).is_empty());
    }

    #[test]
    fn test_soft_dependency_satisfies_core_check() {
        let validator = DependencyValidator::default();
        let descriptor = ModuleDescriptor::new("PexoraChat", "1.0", "PexoraChat.jar")
            .with_soft_depend("PexoraCore");

        assert!(validator.validate(&descriptor).is_empty());
    }

    #[test]
    fn test_both_warnings() {
        let validator = DependencyValidator::default();
        let descriptor = ModuleDescriptor::new("Foo", "1.0", "Foo.jar");

        let warnings = validator.validate(&descriptor);

        assert_eq!(
            warnings,
            vec![
                ValidationWarning::MissingCoreDependency {
                    module: "Foo".into(),
                    core: "PexoraCore".into(),
                },
                ValidationWarning::NamingConvention {
                    module: "Foo".into(),
                    prefix: "Pexora".into(),
                },
            ]
        );
    }

    #[test]
    fn test_custom_identifiers() {
        let validator = DependencyValidator::new("Hub", "Hub");
        let descriptor = ModuleDescriptor::new("HubChat", "1.0", "HubChat.jar").with_depend("Hub");

        assert!(validator.validate(&descriptor).is_empty());
        assert_eq!(validator.core_identifier(), "Hub");
        assert_eq!(validator.prefix(), "Hub");
    }

    #[test]
    fn test_warning_display() {
        let warning = ValidationWarning::NamingConvention {
            module: "Foo".into(),
            prefix: "Pexora".into(),
        };
        assert!(warning.to_string().contains("Pexora*"));
    }
}
