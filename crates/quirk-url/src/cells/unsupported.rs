//! Cells that are recognized but cannot be compiled.

use super::{REGISTER_SIZES, sized_family};
use crate::registry::{CellKind, CellMaker};

fn unsupported(out: &mut Vec<CellMaker>, ids: &[&str], reason: &'static str) {
    for id in ids {
        out.push(CellMaker::new(*id, 1, CellKind::Unsupported { reason }));
    }
}

fn unsupported_family(out: &mut Vec<CellMaker>, prefix: &str, reason: &'static str) {
    sized_family(out, prefix, REGISTER_SIZES, |_| CellKind::Unsupported {
        reason,
    });
}

pub(super) fn generate(out: &mut Vec<CellMaker>) {
    unsupported(out, &["__error__", "__unstable__UniversalNot"], "not a physical gate");

    unsupported(
        out,
        &["|0⟩⟨0|", "|1⟩⟨1|", "|+⟩⟨+|", "|-⟩⟨-|", "|X⟩⟨X|", "|/⟩⟨/|", "0"],
        "post-selection is not supported",
    );

    unsupported(
        out,
        &["XDetectControlReset", "YDetectControlReset", "ZDetectControlReset"],
        "classical feedback is not supported",
    );

    unsupported(out, &["X^⌈t⌉", "X^⌈t-¼⌉"], "discrete parameter");
    for prefix in ["Counting", "Uncounting", ">>t", "<<t"] {
        unsupported_family(out, prefix, "discrete parameter");
    }

    for prefix in [
        "incmodR", "decmodR", "+AmodR", "-AmodR", "+ABmodR", "-ABmodR", "*AmodR", "/AmodR",
        "*BToAmodR", "/BToAmodR",
    ] {
        unsupported_family(out, prefix, "modular arithmetic is not supported");
    }

    unsupported(out, &["setA", "setB", "setR"], "cross column effects");

    unsupported_family(out, "add", "deprecated; use +=A instead");
    unsupported_family(out, "sub", "deprecated; use -=A instead");
    unsupported_family(out, "c+=ab", "deprecated; use +=AB instead");
    unsupported_family(out, "c-=ab", "deprecated; use -=AB instead");
}
