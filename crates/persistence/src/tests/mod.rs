// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

mod record_tests;

use chrono::{TimeZone, Utc};
use tourdesk_domain::FixedClock;

/// A clock fixed at 2026-03-01 12:00 UTC.
pub fn create_test_clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
}
