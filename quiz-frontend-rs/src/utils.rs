use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Uniformly random permutation of `items`, reproducible from `seed`.
pub fn shuffled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut items = items.to_vec();
    items.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    items
}

/// A fresh seed for a session nobody asked to be reproducible.
#[cfg(target_arch = "wasm32")]
pub fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn random_seed() -> u64 {
    use std::hash::{BuildHasher, Hasher};

    // every RandomState is keyed differently, which is all the entropy we need for a shuffle
    std::collections::hash_map::RandomState::new()
        .build_hasher()
        .finish()
}

/// Resolves after `ms` milliseconds, using the browser's timer.
pub(crate) async fn sleep_ms(ms: u32) -> Result<(), wasm_bindgen::JsValue> {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("no window"))
            .and_then(|window| {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    &resolve,
                    ms.min(i32::MAX as u32) as i32,
                )
            });
        if let Err(e) = scheduled {
            log::warn!("Could not schedule timer, continuing immediately: {e:?}");
            if let Err(e) = resolve.call0(&wasm_bindgen::JsValue::null()) {
                log::warn!("Could not resolve timer promise: {e:?}");
            }
        }
    });
    wasm_bindgen_futures::JsFuture::from(promise).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_order() {
        let items: Vec<u32> = (0..20).collect();
        assert_eq!(shuffled(&items, 7), shuffled(&items, 7));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let items: Vec<u32> = (0..20).collect();
        let mut order = shuffled(&items, 42);
        assert_ne!(order, items, "20 items should not come back in order");
        order.sort();
        assert_eq!(order, items);
    }
}
