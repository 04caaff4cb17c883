//! Declared method capabilities.
//!
//! Controllers and plugins describe their callable surface with a static
//! table of [`MethodDescriptor`]s instead of runtime introspection. The
//! pipeline only ever calls methods whose flags are [invokable].
//!
//! [invokable]: MethodFlags::is_invokable

bitflags::bitflags! {
    /// Visibility and role of a declared method.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodFlags: u8 {
        /// Declared `pub`.
        const PUBLIC = 1;
        /// Sealed against dispatch (`#[action(sealed)]`, `#[hook(sealed)]`).
        const FINAL = 1 << 1;
        /// Associated function without a receiver, such as `new`.
        const CONSTRUCTOR = 1 << 2;
    }
}

impl MethodFlags {
    /// Public, not final, not a constructor.
    pub const fn is_invokable(self) -> bool {
        self.contains(Self::PUBLIC) && !self.intersects(Self::FINAL.union(Self::CONSTRUCTOR))
    }
}

/// Name and flags of a declared method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    name: &'static str,
    flags: MethodFlags,
}

impl MethodDescriptor {
    /// Create a descriptor.
    pub const fn new(name: &'static str, flags: MethodFlags) -> Self {
        Self { name, flags }
    }

    /// Descriptor of a plain public method.
    pub const fn public(name: &'static str) -> Self {
        Self::new(name, MethodFlags::PUBLIC)
    }

    /// The method name as seen by the pipeline.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The method flags.
    pub const fn flags(&self) -> MethodFlags {
        self.flags
    }

    /// Shorthand for `self.flags().is_invokable()`.
    pub const fn is_invokable(&self) -> bool {
        self.flags.is_invokable()
    }
}
