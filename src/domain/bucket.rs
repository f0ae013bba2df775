use std::fmt;

/// Routing label selecting which destination a notification goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Bucket {
    Priority,
    Camera,
    #[default]
    General,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Priority, Bucket::Camera, Bucket::General];

    /// Resolve a configured label. Blank or unknown labels map to `General`.
    pub fn resolve(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "priority" => Bucket::Priority,
            "camera" => Bucket::Camera,
            _ => Bucket::General,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Priority => "priority",
            Bucket::Camera => "camera",
            Bucket::General => "general",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Bucket::Priority => "🔥",
            Bucket::Camera => "📷",
            Bucket::General => "📦",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_labels() {
        assert_eq!(Bucket::resolve("priority"), Bucket::Priority);
        assert_eq!(Bucket::resolve(" Camera "), Bucket::Camera);
        assert_eq!(Bucket::resolve("GENERAL"), Bucket::General);
    }

    #[test]
    fn test_resolve_falls_back_to_general() {
        assert_eq!(Bucket::resolve(""), Bucket::General);
        assert_eq!(Bucket::resolve("   "), Bucket::General);
        assert_eq!(Bucket::resolve("watches"), Bucket::General);
    }
}
