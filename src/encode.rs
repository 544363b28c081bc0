pub(crate) mod qr;
