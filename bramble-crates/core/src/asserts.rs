//! Leveled assertions used throughout the solver.
//!
//! Checks at a level above [`BRAMBLE_ASSERT_LEVEL_DEFINITION`] are compiled in but never run. The
//! `debug-checks` feature raises the level so the more expensive invariants are verified as well.

pub const BRAMBLE_ASSERT_LEVEL_DEFINITION: u8 = if cfg!(feature = "debug-checks") {
    BRAMBLE_ASSERT_ADVANCED
} else {
    BRAMBLE_ASSERT_SIMPLE
};

pub const BRAMBLE_ASSERT_SIMPLE: u8 = 1;
pub const BRAMBLE_ASSERT_MODERATE: u8 = 2;
pub const BRAMBLE_ASSERT_ADVANCED: u8 = 3;
pub const BRAMBLE_ASSERT_EXTREME: u8 = 4;

#[macro_export]
macro_rules! bramble_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::BRAMBLE_ASSERT_LEVEL_DEFINITION >= $crate::asserts::BRAMBLE_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! bramble_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::BRAMBLE_ASSERT_LEVEL_DEFINITION >= $crate::asserts::BRAMBLE_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! bramble_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::BRAMBLE_ASSERT_LEVEL_DEFINITION >= $crate::asserts::BRAMBLE_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! bramble_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::BRAMBLE_ASSERT_LEVEL_DEFINITION >= $crate::asserts::BRAMBLE_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! bramble_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::asserts::BRAMBLE_ASSERT_LEVEL_DEFINITION >= $crate::asserts::BRAMBLE_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}
