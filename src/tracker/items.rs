// Built-in progressive items and their upgrade images, in cycle order.

pub const ITEM_CLASS: &str = "item";

pub const SWORD: &[&str] = &["img/sword1.gif", "img/sword2.gif", "img/sword3.gif"];

pub const FLUTE: &[&str] = &[
    "img/flutestrange.gif",
    "img/flutericky.gif",
    "img/flutedimitri.gif",
    "img/flutemoosh.gif",
];

pub const SHIELD: &[&str] = &["img/shield1.gif", "img/shield2.gif", "img/shield3.gif"];

pub const PROGRESSIVE: &[(&str, &[&str])] = &[("sword", SWORD), ("flute", FLUTE), ("shield", SHIELD)];
