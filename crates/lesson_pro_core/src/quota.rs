//! Free-generation quota for signed-in accounts.

use crate::domain::UserRecord;

/// Free lesson plans per account before an upgrade is required.
pub const FREE_GENERATION_LIMIT: u32 = 2;

/// Anonymous callers are not metered here; signed-in users may generate
/// while they are under the free limit.
pub fn can_generate(user: Option<&UserRecord>) -> bool {
    match user {
        None => true,
        Some(user) => user.generation_count < FREE_GENERATION_LIMIT,
    }
}

/// Generations left before the limit. `None` for anonymous callers.
pub fn remaining_generations(user: Option<&UserRecord>) -> Option<u32> {
    user.map(|u| FREE_GENERATION_LIMIT.saturating_sub(u.generation_count))
}
