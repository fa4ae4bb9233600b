use clsview_api::Demangler;

/// Maps JVM-mangled member names back to the declared name.
///
/// Compiler-generated names such as `access$000` or `lambda$run$0` keep the
/// declared name before the first `$`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InternalNameDemangler;

impl Demangler for InternalNameDemangler {
    fn demangle(&self, name: &str) -> Option<String> {
        match name.split_once('$') {
            Some((declared, _)) if !declared.is_empty() => Some(declared.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_everything_after_the_first_dollar() {
        let demangler = InternalNameDemangler;
        assert_eq!(demangler.demangle("compute$impl"), Some("compute".to_string()));
        assert_eq!(demangler.demangle("lambda$run$0"), Some("lambda".to_string()));
        assert_eq!(demangler.demangle("compute"), None);
        assert_eq!(demangler.demangle("$jacocoInit"), None);
    }
}
