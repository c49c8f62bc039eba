use indexmap::IndexMap;
use models::ValidationResult;

use crate::validator::Validator;

/// Ordered validator sequence for one target.
///
/// Registration needs `&mut self` and validation only `&self`, so the
/// sequence cannot change while a validation run is borrowing it.
pub struct Validators<T: ?Sized> {
    entries: Vec<Box<dyn Validator<T>>>,
}

impl<T: ?Sized> Default for Validators<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Validators<T> {
    pub fn new() -> Self {
        Validators {
            entries: Vec::new(),
        }
    }

    /// Appends `validator`; it runs after every validator registered before it.
    pub fn register_validator<V>(&mut self, validator: V)
    where
        V: Validator<T> + 'static,
    {
        self.entries.push(Box::new(validator));
    }

    pub fn with<V>(mut self, validator: V) -> Self
    where
        V: Validator<T> + 'static,
    {
        self.register_validator(validator);
        self
    }

    /// Runs every validator in registration order and keeps the failures.
    pub fn validate(&self, instance: &T) -> Vec<ValidationResult> {
        self.entries
            .iter()
            .map(|validator| validator.validate(instance))
            .filter(|result| !result.is_valid)
            .collect()
    }

    pub fn is_valid(&self, instance: &T) -> bool {
        self.entries
            .iter()
            .all(|validator| validator.validate(instance).is_valid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn describe(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|validator| validator.describe())
            .collect()
    }
}

/// Validator sequences keyed by target name, e.g. one per record type.
pub struct Registry<T: ?Sized> {
    targets: IndexMap<String, Validators<T>>,
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Registry<T> {
    pub fn new() -> Self {
        Registry {
            targets: IndexMap::new(),
        }
    }

    /// Appends `validator` to `target`'s sequence, creating the sequence if needed.
    pub fn register_validator<V>(&mut self, target: &str, validator: V)
    where
        V: Validator<T> + 'static,
    {
        let validators = self.targets.entry(target.to_string()).or_default();
        logging::debug(&format!(
            "Registering validator #{} for '{}': {}",
            validators.len() + 1,
            target,
            validator.describe()
        ));
        validators.register_validator(validator);
    }

    /// Failing results for `instance` under `target`. Unknown targets have no
    /// validators and therefore never fail.
    pub fn validate(&self, target: &str, instance: &T) -> Vec<ValidationResult> {
        self.targets
            .get(target)
            .map(|validators| validators.validate(instance))
            .unwrap_or_default()
    }

    pub fn validators(&self, target: &str) -> Option<&Validators<T>> {
        self.targets.get(target)
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    pub fn contains_target(&self, target: &str) -> bool {
        self.targets.contains_key(target)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// An instance carrying its own validator sequence.
pub struct Validated<T> {
    value: T,
    validators: Validators<T>,
}

impl<T> Validated<T> {
    pub fn new(value: T) -> Self {
        Validated {
            value,
            validators: Validators::new(),
        }
    }

    pub fn register_validator<V>(&mut self, validator: V)
    where
        V: Validator<T> + 'static,
    {
        self.validators.register_validator(validator);
    }

    pub fn with<V>(mut self, validator: V) -> Self
    where
        V: Validator<T> + 'static,
    {
        self.register_validator(validator);
        self
    }

    pub fn validate(&self) -> Vec<ValidationResult> {
        self.validators.validate(&self.value)
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Mutable access is only possible while no validation is running.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Types whose validators are shared by every instance of the type.
///
/// Implementors usually keep the sequence in a `once_cell::sync::Lazy` static.
pub trait Validatable: 'static {
    fn validators() -> &'static Validators<Self>;

    fn validate(&self) -> Vec<ValidationResult> {
        Self::validators().validate(self)
    }

    fn is_valid(&self) -> bool {
        Self::validators().is_valid(self)
    }
}
