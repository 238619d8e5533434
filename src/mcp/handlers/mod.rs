pub(crate) mod add_numbers;
pub(crate) mod echo;
pub(crate) mod time;
pub(crate) mod weather;
