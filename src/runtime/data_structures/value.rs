use std::{ fmt::{ self,
                   Debug,
                   Display,
                   Formatter },
           hash::{ Hash,
                   Hasher } };



/// Core value enumeration used by the runtime.  Everything that lives on a task's data stack, in
/// its status slot or in a variable binding is one of these.
#[derive(Clone, PartialOrd)]
pub enum Value
{
    /// The value represents nothing and no data is associated.
    None,

    /// We have an integer value.  Represented as an i64.
    Int(i64),

    /// A floating-point value  Represented as a f64.
    Float(f64),

    /// A boolean value.
    Bool(bool),

    /// A string value.  Strings double as variable names for the fetch and store words.
    String(String)
}


/// Convert an arbitrary data type to a Value.
pub trait ToValue
{
    /// Implement to handle the actual conversion.
    fn to_value(&self) -> Value;
}


impl ToValue for &str
{
    fn to_value(&self) -> Value
    {
        Value::String((*self).to_string())
    }
}


impl From<&str> for Value
{
    fn from(original: &str) -> Value
    {
        original.to_value()
    }
}


impl Default for Value
{
    fn default() -> Value
    {
        Value::None
    }
}


/// Values can hold floating point numbers which break the Eq rules.  Don't use floats as variable
/// names or hash keys.
impl Eq for Value {}


/// Numeric values compare across variants, everything else only compares within its own variant.
impl PartialEq for Value
{
    fn eq(&self, other: &Value) -> bool
    {
        match ( self, other )
        {
            ( Value::None,      Value::None      ) => true,
            ( Value::String(a), Value::String(b) ) => a == b,
            ( Value::Bool(a),   Value::Bool(b)   ) => a == b,

            _ if Value::both_are_numeric(self, other) =>
                {
                    if Value::either_is_float(self, other)
                    {
                        self.get_float_val() == other.get_float_val()
                    }
                    else
                    {
                        self.get_int_val() == other.get_int_val()
                    }
                }

            _ => false
        }
    }
}


impl Hash for Value
{
    fn hash<H: Hasher>(&self, state: &mut H)
    {
        match self
        {
            Value::None          => 0.hash(state),
            Value::Int(value)    => value.hash(state),
            Value::Float(value)  => value.to_bits().hash(state),
            Value::Bool(value)   => value.hash(state),
            Value::String(value) => value.hash(state)
        }
    }
}


/// The display form used by the print word.  Strings are shown raw.
impl Display for Value
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            Value::None          => write!(f, "none"),
            Value::Int(value)    => write!(f, "{}", value),
            Value::Float(value)  => write!(f, "{}", value),
            Value::Bool(value)   => write!(f, "{}", value),
            Value::String(value) => write!(f, "{}", value)
        }
    }
}


/// Like the display form, but strings are quoted and escaped so stack dumps are unambiguous.
impl Debug for Value
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            Value::String(value) => write!(f, "{}", Value::stringify(value)),
            _                    => write!(f, "{}", self)
        }
    }
}


/// Define implementations for converting between Values and the raw data types they represent.
macro_rules! value_conversion
{
    ($data_type:ty , $variant:ident) =>
    {
        #[doc = concat!("Allow conversion from ", stringify!($data_type), " to a Value.")]
        impl ToValue for $data_type
        {
            fn to_value(&self) -> Value
            {
                Value::$variant(self.clone())
            }
        }


        #[doc = concat!("Support converting from a ", stringify!($data_type), " to a Value.")]
        impl From<$data_type> for Value
        {
            fn from(original: $data_type) -> Value
            {
                original.to_value()
            }
        }
    };
}


value_conversion!(i64,    Int);
value_conversion!(f64,    Float);
value_conversion!(bool,   Bool);
value_conversion!(String, String);


impl Value
{
    /// Check if either of the two values is a float, in which case numeric comparisons are done
    /// in floating point.
    pub fn either_is_float(a: &Value, b: &Value) -> bool
    {
        matches!(a, Value::Float(_)) || matches!(b, Value::Float(_))
    }


    /// Is the value any kind of numeric variant type?
    pub fn is_numeric(&self) -> bool
    {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Bool(_))
    }


    /// Are both values numeric types?
    pub fn both_are_numeric(a: &Value, b: &Value) -> bool
    {
        a.is_numeric() && b.is_numeric()
    }


    /// Convert the Value to a boolean value, performing simple tests if it's not directly a boolean
    /// value.  This is what the conditional jump tests.
    pub fn get_bool_val(&self) -> bool
    {
        match self
        {
            Value::None          => false,
            Value::Int(value)    => *value != 0,
            Value::Float(value)  => *value != 0.0,
            Value::Bool(value)   => *value,
            Value::String(value) => !value.is_empty()
        }
    }


    /// Integer view of a numeric value.  Non-numeric values read as zero.
    pub fn get_int_val(&self) -> i64
    {
        match self
        {
            Value::Int(value)   => *value,
            Value::Float(value) => *value as i64,
            Value::Bool(value)  => if *value { 1 } else { 0 },
            _                   => 0
        }
    }

    /// Floating point view of a numeric value.  Non-numeric values read as zero.
    pub fn get_float_val(&self) -> f64
    {
        match self
        {
            Value::Int(value)   => *value as f64,
            Value::Float(value) => *value,
            Value::Bool(value)  => if *value { 1.0 } else { 0.0 },
            _                   => 0.0
        }
    }


    /// Convert a string to a string that could be used directly within source code.  For example,
    /// new lines are converted to the \n escape sequence, etc.  The string is also enclosed in
    /// double quotes.
    pub fn stringify(text: &str) -> String
    {
        let mut result = String::new();

        result.push('"');

        for character in text.chars()
        {
            match character
            {
                '"'  => result.push_str("\\\""),
                '\n' => result.push_str("\\n"),
                '\r' => result.push_str("\\r"),
                '\t' => result.push_str("\\t"),
                '\\' => result.push_str("\\\\"),
                _    => result.push(character)
            }
        }

        result.push('"');

        result
    }
}
