//! Software engine vs. register bridge on fixed inputs

use kyberlink_algorithms::poly::rom::render_package;
use kyberlink_algorithms::{Polynomial, ZETAS};
use kyberlink_hardware::bridge::Slot;
use kyberlink_hardware::{
    mismatches, Accelerator, HardwareBridge, PollConfig, PollOutcome, SimulatedCore, SoftwareAccelerator,
};
use kyberlink_params::registers::{KEYGEN_SEED, OP_INTT};
use kyberlink_tests::{seeded_rng, small, uniform};

fn bridge() -> HardwareBridge<SimulatedCore> {
    HardwareBridge::new(SimulatedCore::new(), PollConfig::default()).unwrap()
}

#[test]
fn test_forward_and_inverse_agree() {
    let mut rng = seeded_rng(7);
    let mut hw = bridge();
    let mut sw = SoftwareAccelerator::new();
    for _ in 0..8 {
        let p = uniform(&mut rng);
        let hw_hat = hw.forward_ntt(&p).unwrap();
        assert_eq!(mismatches(&hw_hat, &sw.forward_ntt(&p).unwrap()), 0);
        let hw_back = hw.inverse_ntt(&hw_hat).unwrap();
        assert_eq!(hw_back, p);
    }
}

#[test]
fn test_mul_acc_agrees() {
    let mut rng = seeded_rng(11);
    let mut hw = bridge();
    let mut sw = SoftwareAccelerator::new();
    for _ in 0..8 {
        let acc = small(&mut rng).to_ntt();
        let a = uniform(&mut rng);
        let b = small(&mut rng).to_ntt();
        assert_eq!(hw.mul_acc(&acc, &a, &b).unwrap(), sw.mul_acc(&acc, &a, &b).unwrap());
    }
}

#[test]
fn test_product_through_core_matches_schoolbook() {
    let mut rng = seeded_rng(3);
    let mut hw = bridge();
    let a = uniform(&mut rng);
    let b = small(&mut rng);
    let a_hat = hw.forward_ntt(&a).unwrap();
    let b_hat = hw.forward_ntt(&b).unwrap();
    let prod_hat = hw.mul_acc(&Polynomial::zero(), &a_hat, &b_hat).unwrap();
    let prod = hw.inverse_ntt(&prod_hat).unwrap();
    assert_eq!(prod, a.schoolbook_mul(&b));
}

#[test]
fn test_keygen_seed_agrees() {
    let mut hw = bridge();
    let mut sw = SoftwareAccelerator::new();
    assert_eq!(hw.keygen(KEYGEN_SEED).unwrap(), sw.keygen(KEYGEN_SEED).unwrap());
}

#[test]
fn test_emitted_rom_matches_table() {
    let rom = render_package(&ZETAS).unwrap();
    for (function, table) in [("get_zeta", &ZETAS.forward), ("get_zeta_inv", &ZETAS.inverse)] {
        let start = rom.find(&format!("function automatic logic [15:0] {}", function)).unwrap();
        let body = &rom[start..];
        let body = &body[..body.find("endfunction").unwrap()];
        let mut seen = 0;
        for line in body.lines().filter(|l| l.contains("7'd")) {
            let (idx, val) = line.trim().split_once(':').unwrap();
            let idx: usize = idx.trim().trim_start_matches("7'd").parse().unwrap();
            let val: u16 = val
                .trim()
                .trim_start_matches("return 16'd")
                .trim_end_matches(';')
                .parse()
                .unwrap();
            assert_eq!(table[idx], val, "{}[{}]", function, idx);
            seen += 1;
        }
        assert_eq!(seen, 128);
    }
}

#[test]
fn test_slow_core_times_out_without_hanging() {
    let core = SimulatedCore::new().with_latency_scale(1000);
    let poll = PollConfig {
        budget_cycles: 500,
        step_cycles: 50,
    };
    let mut hw = HardwareBridge::new(core, poll).unwrap();
    let p = uniform(&mut seeded_rng(5));
    hw.write_slot(Slot::A, p.as_array()).unwrap();
    let outcome = hw.command(OP_INTT).unwrap();
    assert!(!outcome.is_ready());
    assert_eq!(outcome, PollOutcome::TimedOut { cycles: 500 });
}
