/// Create a newtype that wraps an opaque textual identifier.
///
/// Identifiers are compared by their byte representation.
macro_rules! define_name_type {
    ($name: ident) => {
        #[derive(
            ::std::clone::Clone,
            ::std::default::Default,
            ::std::hash::Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::std::cmp::Ord,
            ::std::cmp::PartialOrd,
            ::std::cmp::Eq,
            ::std::cmp::PartialEq,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[inline]
            pub fn new<S: Into<String>>(value: S) -> Self {
                Self(value.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::std::convert::From<&str> for $name {
            #[inline]
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl ::std::convert::From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl ::std::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(self, f)
            }
        }
    };
}

define_name_type!(AgentId);
define_name_type!(TaskId);

#[cfg(test)]
mod tests {
    use super::AgentId;

    #[test]
    fn test_agent_id_order() {
        let mut ids: Vec<AgentId> = vec!["S10".into(), "S2".into(), "S1".into()];
        ids.sort();
        assert_eq!(ids, vec![AgentId::from("S1"), "S10".into(), "S2".into()]);
    }
}
