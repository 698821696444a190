/// Declare a newtype over `DynamicModel` implementing `Model` for `$shape`.
macro_rules! model_type {
    ($(#[$meta:meta])* $name:ident, $shape:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name($crate::model::DynamicModel);

        impl $crate::model::Model for $name {
            const SHAPE: &'static $crate::model::Shape = $shape;

            fn from_model(model: $crate::model::DynamicModel) -> Self {
                Self(model)
            }

            fn as_model(&self) -> &$crate::model::DynamicModel {
                &self.0
            }

            fn as_model_mut(&mut self) -> &mut $crate::model::DynamicModel {
                &mut self.0
            }

            fn into_model(self) -> $crate::model::DynamicModel {
                self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = $crate::model::DynamicModel;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&self.0, serializer)
            }
        }
    };
}
