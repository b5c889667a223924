use sha2::Sha256;
use srp6a::client::SrpClient;
use srp6a::groups::G_2048;
use srp6a::messages::encode_public;
use srp6a::server::SrpServer;
use srp6a::SrpError;

#[test]
#[should_panic]
fn bad_a_pub() {
    let server = SrpServer::<Sha256>::new(&G_2048);
    server
        .process_reply(b"\x01", b"", b"", b"\x02", &[0u8; 256])
        .unwrap();
}

#[test]
#[should_panic]
fn bad_b_pub() {
    let client = SrpClient::<Sha256>::new(&G_2048);
    client
        .process_reply(b"\x01", b"", b"", b"", &[0u8; 256])
        .unwrap();
}

#[test]
fn a_pub_equal_to_modulus_rejected() {
    // A = N is 0 mod N even though the encoding is nonzero
    let server = SrpServer::<Sha256>::new(&G_2048);
    let a_pub = encode_public(&G_2048, &G_2048.n);
    let err = server
        .process_reply(b"\x01", b"", b"", b"\x02", &a_pub)
        .unwrap_err();
    assert_eq!(err, SrpError::InvalidPublicValue { name: "a_pub" });
}

#[test]
fn b_pub_equal_to_modulus_rejected() {
    let client = SrpClient::<Sha256>::new(&G_2048);
    let b_pub = encode_public(&G_2048, &G_2048.n);
    let err = client
        .process_reply(b"\x01", b"", b"", b"", &b_pub)
        .unwrap_err();
    assert_eq!(err, SrpError::InvalidPublicValue { name: "b_pub" });
}
