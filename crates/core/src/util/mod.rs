/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took to evaluate at the given level, and
/// returns the value of the expression.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Calculate the number of hexes in a hexagon based on its radius. Radius 0
/// means 1 hex, 1 is 7 hexes, 2 is 19, etc. A negative radius holds nothing.
pub fn hexagon_len(radius: i32) -> usize {
    if radius < 0 {
        return 0;
    }
    // We'll always have 3r^2+3r+1 hexes (a reduction of a geometric sum).
    // f(0) = 1, and we add 6r hexes for every step after that, so:
    // 1, (+6) 7, (+12) 19, (+18) 37, ...
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexagon_len() {
        assert_eq!(hexagon_len(-1), 0);
        assert_eq!(hexagon_len(0), 1);
        assert_eq!(hexagon_len(1), 7);
        assert_eq!(hexagon_len(2), 19);
        assert_eq!(hexagon_len(3), 37);
        assert_eq!(hexagon_len(50), 7651);
    }

    #[test]
    fn test_timed() {
        let value = timed!("Addition", log::Level::Trace, 1 + 2);
        assert_eq!(value, 3);
        assert_eq!(timed!("Default level", "value"), "value");
    }
}
