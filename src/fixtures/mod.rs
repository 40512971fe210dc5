//! Benchmark fixtures
//!
//! The object graphs that get pickled: a user-profile record, a numeric
//! tuple, three seeded mutations of the profile, a list of lists and a
//! dict of dicts. They are built once by [`Fixtures::new`] and only read
//! afterwards.

pub mod mutate;

pub use mutate::{mutate_dict, mutate_value};

use crate::pickle::{Date, Value};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Seed used for the mutated profile group
pub const DEFAULT_SEED: u64 = 5;

/// Number of mutated profile copies
pub const DICT_GROUP_SIZE: usize = 3;

/// Large integers of the tuple fixture
const TUPLE_INTS: [i64; 20] = [
    265867233, 265868503, 265252341, 265243910, 265879514, 266219766, 266021701, 265843726,
    265592821, 265246784, 265853180, 45526486, 265463699, 265848143, 265863062, 265392591,
    265877490, 265823665, 265828884, 265753032,
];

/// All benchmark inputs
#[derive(Debug, Clone, PartialEq)]
pub struct Fixtures {
    /// Flat user-profile record
    pub dict: Value,
    /// Twenty large integers and a trailing small one
    pub tuple: Value,
    /// Seeded mutations of `dict`
    pub dict_group: Value,
    /// Ten pairs of `0..10` lists
    pub list: Value,
    /// 100 integer keys mapping to dicts of null values
    pub micro_dict: Value,
}

impl Fixtures {
    /// Build every fixture, mutating the profile with `seed`
    pub fn new(seed: u64) -> Self {
        let dict = profile_dict();
        let mut rng = StdRng::seed_from_u64(seed);
        let dict_group = dict_group(&dict, &mut rng);
        let fixtures = Self {
            tuple: numeric_tuple(),
            list: nested_list(),
            micro_dict: micro_dict(),
            dict,
            dict_group,
        };
        debug!(seed, "built benchmark fixtures");
        fixtures
    }

    /// The objects pickled together by the `pickle`/`unpickle` benchmarks
    pub fn record_objects(&self) -> [&Value; 3] {
        [&self.dict, &self.tuple, &self.dict_group]
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// A user-profile record with mixed scalar types
pub fn profile_dict() -> Value {
    let entry = |key: &str, value: Value| (Value::from(key), value);
    let birthday = Date::from_ymd(1980, 5, 7).map_or(Value::Null, Value::Date);
    let tags = ["a", "b", "c", "d", "e", "f", "g"]
        .into_iter()
        .map(Value::from)
        .collect();

    Value::Dict(vec![
        entry("ads_flags", Value::Int(0)),
        entry("age", Value::Int(18)),
        entry("birthday", birthday),
        entry("bulletin_count", Value::Int(0)),
        entry("comment_count", Value::Int(0)),
        entry("country", Value::from("BR")),
        entry("encrypted_id", Value::from("G9urXXAJwjE")),
        entry("favorite_count", Value::Int(9)),
        entry("first_name", Value::from("")),
        entry("flags", Value::Int(412317970704)),
        entry("friend_count", Value::Int(0)),
        entry("gender", Value::from("m")),
        entry("gender_for_display", Value::from("Male")),
        entry("id", Value::Int(302935349)),
        entry("is_custom_profile_icon", Value::Int(0)),
        entry("last_name", Value::from("")),
        entry("locale_preference", Value::from("pt_BR")),
        entry("member", Value::Int(0)),
        entry("tags", Value::List(tags)),
        entry("profile_foo_id", Value::Int(827119638)),
        entry("secure_encrypted_id", Value::from("Z_xxx2dYx3t4YAdnmfgyKw")),
        entry("session_number", Value::Int(2)),
        entry("signup_id", Value::from("201-19225-223")),
        entry("status", Value::from("A")),
        entry("theme", Value::Int(1)),
        entry("time_created", Value::Int(1225237014)),
        entry("time_updated", Value::Int(1233134493)),
        entry("unread_message_count", Value::Int(0)),
        entry("user_group", Value::from("0")),
        entry("username", Value::from("collinwinter")),
        entry("play_count", Value::Int(9)),
        entry("view_count", Value::Int(7)),
        entry("zip", Value::from("")),
    ])
}

/// A list of twenty large integers paired with a small one
pub fn numeric_tuple() -> Value {
    Value::Tuple(vec![Value::int_list(TUPLE_INTS), Value::Int(60)])
}

/// `DICT_GROUP_SIZE` mutated copies of `dict`
pub fn dict_group(dict: &Value, rng: &mut StdRng) -> Value {
    Value::List((0..DICT_GROUP_SIZE).map(|_| mutate_dict(dict, rng)).collect())
}

/// Ten pairs of `0..10` integer lists
pub fn nested_list() -> Value {
    Value::List(
        (0..10)
            .map(|_| Value::List(vec![Value::int_list(0..10), Value::int_list(0..10)]))
            .collect(),
    )
}

/// 100 integer keys, each mapping to a dict of keys `0..10` with null values
pub fn micro_dict() -> Value {
    let inner = || Value::Dict((0..10).map(|k| (Value::Int(k), Value::Null)).collect());
    Value::Dict((0..100).map(|key| (Value::Int(key), inner())).collect())
}
