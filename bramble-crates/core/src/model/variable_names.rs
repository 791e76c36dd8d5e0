use crate::containers::HashMap;
use crate::engine::variables::DomainId;

/// The names given to variables when they were created.
#[derive(Debug, Default, Clone)]
pub struct VariableNames {
    integers: HashMap<DomainId, String>,
}

impl VariableNames {
    /// Get the name associated with a domain id.
    pub fn get_int_name(&self, domain_id: DomainId) -> Option<&str> {
        self.integers.get(&domain_id).map(|s| s.as_str())
    }

    /// Add a name to the integer variable. This will override the existing name if it exists.
    pub fn add_integer(&mut self, integer: DomainId, name: String) {
        let _ = self.integers.insert(integer, name);
    }

    /// The name of the variable, falling back to the display form of its id.
    pub fn name_or_default(&self, domain_id: DomainId) -> String {
        self.get_int_name(domain_id)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| domain_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_variables_fall_back_to_their_id() {
        let mut names = VariableNames::default();
        names.add_integer(DomainId::new(0), "colour".to_owned());

        assert_eq!("colour", names.name_or_default(DomainId::new(0)));
        assert_eq!("x1", names.name_or_default(DomainId::new(1)));
    }
}
