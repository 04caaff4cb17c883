//! Registration macros.
//!
//! Each macro submits a registration to `inventory`, so the component is
//! picked up by every builder created afterwards.

/// Register a controller type.
///
/// The type must implement `Default`. Without an explicit name the type's
/// `IDENTITY` (generated by `#[controller]`) is used.
///
/// # Example
/// ```ignore
/// register_controller!(Blog);
/// register_controller!("Archive", Blog);
/// ```
#[macro_export]
macro_rules! register_controller {
    ($ty:ty) => {
        $crate::register_controller!(<$ty>::IDENTITY, $ty);
    };
    ($name:expr, $ty:ty) => {
        $crate::inventory::submit! {
            $crate::ControllerRegistration::new($name, || -> ::std::boxed::Box<dyn $crate::Controller> {
                ::std::boxed::Box::new(<$ty as ::core::default::Default>::default())
            })
        }
    };
}

/// Register a plugin type.
///
/// Same rules as [`register_controller!`].
///
/// # Example
/// ```ignore
/// register_plugin!(Audit);
/// ```
#[macro_export]
macro_rules! register_plugin {
    ($ty:ty) => {
        $crate::register_plugin!(<$ty>::IDENTITY, $ty);
    };
    ($name:expr, $ty:ty) => {
        $crate::inventory::submit! {
            $crate::PluginRegistration::new($name, || -> ::std::boxed::Box<dyn $crate::Plugin> {
                ::std::boxed::Box::new(<$ty as ::core::default::Default>::default())
            })
        }
    };
}

/// Register a model type built with `Default`.
#[macro_export]
macro_rules! register_model {
    ($name:expr, $ty:ty) => {
        $crate::inventory::submit! {
            $crate::ModelRegistration::new($name, || -> $crate::Component {
                ::std::boxed::Box::new(<$ty as ::core::default::Default>::default())
            })
        }
    };
}

/// Register a library type built with [`FromApp`](crate::FromApp).
#[macro_export]
macro_rules! register_library {
    ($name:expr, $ty:ty) => {
        $crate::inventory::submit! {
            $crate::LibraryRegistration::new($name, |app: &dyn $crate::App| -> $crate::Component {
                ::std::boxed::Box::new(<$ty as $crate::FromApp>::from_app(app))
            })
        }
    };
}
