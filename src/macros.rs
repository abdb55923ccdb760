use crate::schema::{Field, FieldMap, Schema, TypeToken};

/// Build a [`Schema`] from a literal that reads like the payload.
///
/// Dictionaries become [`Schema::Object`] nodes with optional fields, a
/// one-element list pins the element schema, a multi-element list means
/// "each element matches one of these", and any other expression goes
/// through `Schema::from`, so `"hello"`, `5` and `true` are literal values
/// while constructor calls like [`string()`](crate::string) pass through.
///
/// Dotted and bracketed keys keep their rewriting semantics:
/// `"kids.grade"` nests, `"[kids].name"` crosses into array elements.
///
/// # Example
/// ```
/// use litmus::{boolean, integer, schema, string};
///
/// let person = schema!({
///     "name": string(),
///     "active": boolean(),
///     "age": integer(),
///     "pets": [string()],
/// });
/// assert!(person.is_valid());
/// ```
#[macro_export]
macro_rules! schema {
    ($($tt:tt)+) => {
        $crate::schema_internal!($($tt)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! schema_internal {
    //////////////////////////////////////////////////////////////////////////
    // Lists: munch elements left to right into a Vec<Schema>.
    //////////////////////////////////////////////////////////////////////////

    ([]) => {
        $crate::array()
    };

    ([ $($tt:tt)+ ]) => {
        $crate::__schema_array($crate::schema_internal!(@array [] $($tt)+))
    };

    // All elements munched, trailing comma.
    (@array [$($elems:expr,)*]) => {
        vec![$($elems,)*]
    };

    // All elements munched, no trailing comma.
    (@array [$($elems:expr),*]) => {
        vec![$($elems),*]
    };

    // The element in front is a list.
    (@array [$($elems:expr,)*] [$($inner:tt)*] $($rest:tt)*) => {
        $crate::schema_internal!(@array [$($elems,)* $crate::schema_internal!([$($inner)*])] $($rest)*)
    };

    // The element in front is a dictionary.
    (@array [$($elems:expr,)*] {$($inner:tt)*} $($rest:tt)*) => {
        $crate::schema_internal!(@array [$($elems,)* $crate::schema_internal!({$($inner)*})] $($rest)*)
    };

    // The element in front is an expression followed by a comma.
    (@array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::schema_internal!(@array [$($elems,)* $crate::schema_internal!($next),] $($rest)*)
    };

    // The final element is an expression.
    (@array [$($elems:expr,)*] $last:expr) => {
        $crate::schema_internal!(@array [$($elems,)* $crate::schema_internal!($last)])
    };

    // Separator after a munched element.
    (@array [$($elems:expr),*] , $($rest:tt)*) => {
        $crate::schema_internal!(@array [$($elems,)*] $($rest)*)
    };

    //////////////////////////////////////////////////////////////////////////
    // Dictionaries: munch the key token by token, then the value.
    //////////////////////////////////////////////////////////////////////////

    ({}) => {
        $crate::__schema_object(vec![])
    };

    ({ $($tt:tt)+ }) => {
        $crate::__schema_object({
            let mut pairs = vec![];
            $crate::schema_internal!(@object pairs () ($($tt)+) ($($tt)+));
            pairs
        })
    };

    // All entries munched.
    (@object $pairs:ident () () ()) => {};

    // Push the finished entry, more entries follow.
    (@object $pairs:ident [$($key:tt)+] ($value:expr) , $($rest:tt)*) => {
        $pairs.push((($($key)+).into(), $value));
        $crate::schema_internal!(@object $pairs () ($($rest)*) ($($rest)*));
    };

    // Push the final entry.
    (@object $pairs:ident [$($key:tt)+] ($value:expr)) => {
        $pairs.push((($($key)+).into(), $value));
    };

    // The value in front is a list.
    (@object $pairs:ident ($($key:tt)+) (: [$($inner:tt)*] $($rest:tt)*) $copy:tt) => {
        $crate::schema_internal!(@object $pairs [$($key)+] ($crate::schema_internal!([$($inner)*])) $($rest)*);
    };

    // The value in front is a dictionary.
    (@object $pairs:ident ($($key:tt)+) (: {$($inner:tt)*} $($rest:tt)*) $copy:tt) => {
        $crate::schema_internal!(@object $pairs [$($key)+] ($crate::schema_internal!({$($inner)*})) $($rest)*);
    };

    // The value in front is an expression followed by a comma.
    (@object $pairs:ident ($($key:tt)+) (: $value:expr , $($rest:tt)*) $copy:tt) => {
        $crate::schema_internal!(@object $pairs [$($key)+] ($crate::schema_internal!($value)) , $($rest)*);
    };

    // The final value is an expression.
    (@object $pairs:ident ($($key:tt)+) (: $value:expr) $copy:tt) => {
        $crate::schema_internal!(@object $pairs [$($key)+] ($crate::schema_internal!($value)));
    };

    // Fully parenthesized key, e.g. a runtime string.
    (@object $pairs:ident () (($key:expr) : $($rest:tt)*) $copy:tt) => {
        $crate::schema_internal!(@object $pairs ($key) (: $($rest)*) (: $($rest)*));
    };

    // Take one token into the key being munched.
    (@object $pairs:ident ($($key:tt)*) ($tt:tt $($rest:tt)*) $copy:tt) => {
        $crate::schema_internal!(@object $pairs ($($key)* $tt) ($($rest)*) $copy);
    };

    //////////////////////////////////////////////////////////////////////////
    // Anything else converts through Schema::from.
    //////////////////////////////////////////////////////////////////////////

    ($other:expr) => {
        $crate::Schema::from($other)
    };
}

#[doc(hidden)]
pub fn __schema_array(mut elements: Vec<Schema>) -> Schema {
    match elements.len() {
        0 => Schema::Type(TypeToken::Array),
        1 => Schema::Array(Box::new(elements.remove(0))),
        _ => Schema::Array(Box::new(Schema::AnyOf(elements))),
    }
}

#[doc(hidden)]
pub fn __schema_object(pairs: Vec<(String, Schema)>) -> Schema {
    let mut fields = FieldMap::new();
    for (key, schema) in pairs {
        fields.insert(
            key,
            Field {
                schema,
                required: false,
            },
        );
    }
    Schema::Object(fields)
}
