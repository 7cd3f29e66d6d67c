use rand::Rng;

/// Produces the lookup target for one request: a uniformly drawn
/// identifier in `[1, domain_size]` formatted into the fixed URL template.
///
/// The domain is 1-based; id 0 never occurs. Randomness does not need to
/// be reproducible across runs, so this draws from [`rand::thread_rng`].
pub fn fixed_url(domain_size: u32) -> String {
    debug_assert!(domain_size > 0, "identifier domain must not be empty");
    let id = rand::thread_rng().gen_range(1..=domain_size);
    format!("https://example.com/{id}")
}
