use rand::RngCore;
use sha2::Sha256;
use srp6a::client::SrpClient;
use srp6a::groups::G_2048;
use srp6a::server::SrpServer;
use srp6a::utils::generate_private_ephemeral;

fn auth_test(true_pwd: &[u8], auth_pwd: &[u8]) {
    let mut rng = rand::rngs::OsRng;
    let username = b"alice";

    // Client instance creation
    let client = SrpClient::<Sha256>::new(&G_2048);

    // Begin Registration

    let mut salt = [0u8; 16];
    rng.fill_bytes(&mut salt);
    let verifier = client.compute_verifier(true_pwd, &salt).unwrap();

    // Client sends username, verifier and salt to the Server for storage

    // Registration Ends

    // Begin Authentication

    // User sends username and a_pub
    let a = generate_private_ephemeral(&mut rng).unwrap();
    let a_pub = client.compute_public_ephemeral(&a);

    // Server retrieves verifier and salt, computes the public B value
    let server = SrpServer::<Sha256>::new(&G_2048);
    let b = generate_private_ephemeral(&mut rng).unwrap();
    let b_pub = server.compute_public_ephemeral(&b, &verifier);

    // Server sends salt and b_pub to client

    // Client processes the challenge and produces M1
    let client_verifier = client
        .process_reply(&a, username, auth_pwd, &salt, &b_pub)
        .unwrap();
    let client_proof = client_verifier.proof();

    // Client sends client_proof to server (M1)

    // Server processes verification data
    let server_verifier = server
        .process_reply(&b, username, &salt, &verifier, &a_pub)
        .unwrap();
    server_verifier.verify_client(client_proof).unwrap();
    let server_proof = server_verifier.proof();
    let server_key = server_verifier.key();

    // Server sends server_proof to client (M2)

    // Client verifies server
    let client_key = client_verifier.key();
    client_verifier.verify_server(server_proof).unwrap();

    // our keys almost must equal but just an extra check
    assert_eq!(
        server_key, client_key,
        "server and client keys are not equal"
    );
}

#[test]
fn good_password() {
    auth_test(b"password", b"password");
}

#[test]
#[should_panic]
fn bad_password() {
    auth_test(b"password", b"paSsword");
}

#[test]
fn verifier_is_deterministic() {
    let client = SrpClient::<Sha256>::new(&G_2048);
    let first = client.compute_verifier(b"1234", b"salt").unwrap();
    let second = client.compute_verifier(b"1234", b"salt").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), G_2048.byte_len());
}
