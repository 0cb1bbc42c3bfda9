//! Cache-Aside Orchestrator
//!
//! Read-through helpers that sit in front of any [`Cache`] implementation:
//! look the key up, produce the value on a miss, and write it back.
//!
//! Both entry points are stateless. Store errors are converted into the
//! caller's error type `E`; producer errors are returned untouched. A store
//! error returned *after* a successful production or promotion means the value
//! in `target` is usable but the cache was not updated.

use tracing::{debug, trace, warn};

use crate::contract::Cache;
use crate::error::{CacheError, Result};

// == Producer Adapter ==
/// Computes the value for a missed key into the caller's destination.
///
/// Implemented for any `FnOnce() -> Result<V, E>`; wrap a closure that fills
/// the destination itself in [`InPlace`].
pub trait Produce<V, E> {
    fn produce_into(self, target: &mut V) -> std::result::Result<(), E>;
}

impl<V, E, F> Produce<V, E> for F
where
    F: FnOnce() -> std::result::Result<V, E>,
{
    fn produce_into(self, target: &mut V) -> std::result::Result<(), E> {
        *target = self()?;
        Ok(())
    }
}

/// Producer that writes into the destination directly.
pub struct InPlace<F>(pub F);

impl<V, E, F> Produce<V, E> for InPlace<F>
where
    F: FnOnce(&mut V) -> std::result::Result<(), E>,
{
    fn produce_into(self, target: &mut V) -> std::result::Result<(), E> {
        (self.0)(target)
    }
}

/// Reads `key` into `target`. `Ok(false)` on a miss, any other failure is
/// returned as is.
fn lookup<V, C>(cache: &C, key: &str, target: &mut V) -> Result<bool>
where
    C: Cache<V> + ?Sized,
{
    match cache.get(key) {
        Ok(value) => {
            *target = value;
            Ok(true)
        }
        Err(err) if err.is_miss() => {
            trace!("Cache-aside miss for key '{}'", key);
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// Writes a produced or promoted value back, logging a failed write.
fn store<V, C>(cache: &C, key: &str, value: &V) -> Result<()>
where
    C: Cache<V> + ?Sized,
{
    cache.put(key, value).inspect_err(|err| {
        warn!("Value for key '{}' is usable but was not cached: {}", key, err);
    })
}

// == With Cache ==
/// Returns the cached value for `key` in `target`, producing and caching it
/// on a miss.
///
/// - `cache` is `None`: `produce` runs, no store is involved.
/// - hit: `target` is overwritten, `produce` does not run.
/// - store failure other than a miss: returned, `produce` does not run.
/// - miss: `produce` runs; its error is returned and nothing is stored.
///   On success the value lands in `target` and the result of `put` is
///   returned.
pub fn with_cache<V, E, C, P>(
    cache: Option<&C>,
    key: &str,
    target: &mut V,
    produce: P,
) -> std::result::Result<(), E>
where
    C: Cache<V> + ?Sized,
    E: From<CacheError>,
    P: Produce<V, E>,
{
    let Some(cache) = cache else {
        return produce.produce_into(target);
    };

    if lookup(cache, key, target)? {
        return Ok(());
    }

    debug!("Producing value for key '{}'", key);
    produce.produce_into(target)?;

    Ok(store(cache, key, target)?)
}

// == With Double Cache ==
/// Two-tier variant of [`with_cache`]: `near` is consulted first, then `far`.
///
/// - either tier is `None`: `produce` runs directly.
/// - near hit: done, `far` is not touched.
/// - far hit: the value is promoted into `near`; the promotion result is
///   returned.
/// - both miss: `produce` runs; on success the value is written to `far`
///   first and, only if that worked, to `near`.
///
/// A non-miss failure from either tier stops everything and is returned.
pub fn with_double_cache<V, E, N, F, P>(
    near: Option<&N>,
    far: Option<&F>,
    key: &str,
    target: &mut V,
    produce: P,
) -> std::result::Result<(), E>
where
    N: Cache<V> + ?Sized,
    F: Cache<V> + ?Sized,
    E: From<CacheError>,
    P: Produce<V, E>,
{
    let (Some(near), Some(far)) = (near, far) else {
        return produce.produce_into(target);
    };

    if lookup(near, key, target)? {
        return Ok(());
    }

    if lookup(far, key, target)? {
        debug!("Promoting key '{}' from far to near tier", key);
        return Ok(store(near, key, target)?);
    }

    debug!("Producing value for key '{}' (missed both tiers)", key);
    produce.produce_into(target)?;

    store(far, key, target)?;
    Ok(store(near, key, target)?)
}
