/// Prime fields whose modulus fits in a `u64`.
pub mod u64_prime_field;
