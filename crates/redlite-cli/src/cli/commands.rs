use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the string stored under a key
    Get { key: String },

    /// Store a string under a key
    Set { key: String, value: String },

    /// Print the kind of value a key holds
    Type { key: String },

    /// Delete a key of any kind
    Del { key: String },

    /// Print the length of a list
    Len { key: String },

    /// Print the list element at a 0-based position
    Index {
        key: String,

        #[arg(allow_negative_numbers = true)]
        position: i64,
    },

    /// Print list elements from START to STOP (-1 for the end)
    Range {
        key: String,

        #[arg(allow_negative_numbers = true)]
        start: i64,

        #[arg(allow_negative_numbers = true)]
        stop: i64,
    },

    /// Append values to a list
    Rpush {
        key: String,

        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Prepend values to a list; the last value ends up first
    Lpush {
        key: String,

        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Remove and print the first element of a list
    Lpop { key: String },

    /// Remove and print the last element of a list
    Rpop { key: String },

    /// Remove COUNT elements from the left end of a list
    LtrimLeft { key: String, count: i64 },

    /// Remove COUNT elements from the right end of a list
    LtrimRight { key: String, count: i64 },
}
