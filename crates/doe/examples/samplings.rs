use egallery_doe::{Lhs, LhsKind, SamplingMethod};
use ndarray::arr2;

fn main() {
    let xlimits = arr2(&[[0., 1.], [-10., 10.], [5., 15.]]);
    let n = 10;

    println!("Take {n} samples in");
    println!("{xlimits}\n");

    println!("*** using classic latin hypercube sampling");
    let samples = Lhs::new(&xlimits).sample(n);
    println!("{samples}\n");

    println!("*** using centered latin hypercube sampling");
    let samples = Lhs::new(&xlimits).kind(LhsKind::Centered).sample(n);
    println!("{samples}\n");

    println!("*** using maximin latin hypercube sampling");
    let samples = Lhs::new(&xlimits).kind(LhsKind::Maximin).sample(n);
    println!("{samples}\n");
}
