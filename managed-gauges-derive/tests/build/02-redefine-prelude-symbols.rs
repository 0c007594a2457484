#![allow(unused_imports)]

// Empty module has nothing and can be used to redefine symbols.
mod empty {}

// redefine the prelude `::std`
use empty as std;

// redefine the dependency `::managed_gauges`
use empty as managed_gauges;

// redefine the prelude `::core::result::Result`.
type Result = ();

enum TResult {
    Ok,
    Err,
}

// redefine the prelude `::core::result::Result::Ok/Err`.
use TResult::Ok;
use TResult::Err;

type Option = ();

enum TOption {
    Some,
    None,
}

// redefine the prelude `::core::option::Option::Some/None`.
use TOption::Some;
use TOption::None;

struct Queue {
    depth: i64,
}

#[::managed_gauges::managed]
impl Queue {
    #[gauge]
    fn depth(&self) -> i64 {
        self.depth
    }

    #[gauge(name = "resize")]
    fn resize(&self, capacity: u32, fill: f64) -> f64 {
        capacity as f64 * fill
    }
}

fn main() {}
