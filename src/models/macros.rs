//! Accessor generators shared by the model types
//!
//! Unsettable attributes are stored as `Option<T>`; `None` means "not set"
//! and reads as the schema default. Containment references are plain owned
//! fields, so handing a child to a parent moves it.

/// Generates `get` / `is_set` / `set` / `unset` for unsettable attributes.
macro_rules! unsettable {
    (
        $owner:ident {
            $( $field:ident : $ty:ty = $default:expr => $is_set:ident, $set:ident, $unset:ident; )+
        }
    ) => {
        impl $owner {
            $(
                #[doc = concat!("`", stringify!($field), "`, or the schema default when unset")]
                pub fn $field(&self) -> $ty {
                    self.$field.unwrap_or($default)
                }

                #[doc = concat!("Whether `", stringify!($field), "` was explicitly assigned")]
                pub fn $is_set(&self) -> bool {
                    self.$field.is_some()
                }

                /// Assigns the value and returns the previous explicit value
                pub fn $set(&mut self, value: $ty) -> Option<$ty> {
                    let old = self.$field.replace(value);
                    $crate::models::notify(stringify!($owner), stringify!($field), &old, &self.$field);
                    old
                }

                /// Reverts to the default and clears the is-set state
                pub fn $unset(&mut self) -> Option<$ty> {
                    let old = self.$field.take();
                    $crate::models::notify(stringify!($owner), stringify!($field), &old, &self.$field);
                    old
                }
            )+
        }
    };
}

/// Generates setters for required (exactly one) containment references.
macro_rules! contains_one {
    ($owner:ident { $( $field:ident : $ty:ty => $set:ident; )+ }) => {
        impl $owner {
            $(
                #[doc = concat!("Moves `child` into `", stringify!($field), "` and returns the child it replaces")]
                pub fn $set(&mut self, child: $ty) -> $ty {
                    $crate::models::notify_containment(stringify!($owner), stringify!($field), true, true);
                    std::mem::replace(&mut self.$field, child)
                }
            )+
        }
    };
}

/// Generates set / take for optional containment references.
macro_rules! contains_opt {
    ($owner:ident { $( $field:ident : $ty:ty => $set:ident, $take:ident; )+ }) => {
        impl $owner {
            $(
                #[doc = concat!("Moves `child` into `", stringify!($field), "` and returns the child it replaces")]
                pub fn $set(&mut self, child: $ty) -> Option<$ty> {
                    let old = self.$field.replace(child);
                    $crate::models::notify_containment(stringify!($owner), stringify!($field), old.is_some(), true);
                    old
                }

                #[doc = concat!("Detaches and returns the `", stringify!($field), "` child")]
                pub fn $take(&mut self) -> Option<$ty> {
                    let old = self.$field.take();
                    $crate::models::notify_containment(stringify!($owner), stringify!($field), old.is_some(), false);
                    old
                }
            )+
        }
    };
}
