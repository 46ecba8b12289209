fn main() {
    dotenv::dotenv().ok();

    if let Ok(api_key) = std::env::var("HUGGINGFACE_API_KEY") {
        println!("cargo:rustc-env=HUGGINGFACE_API_KEY={}", api_key);
    } else {
        println!("cargo:warning=HUGGINGFACE_API_KEY is not set; classification will be disabled");
    }

    if let Ok(endpoint) = std::env::var("CLASSIFIER_ENDPOINT") {
        println!("cargo:rustc-env=CLASSIFIER_ENDPOINT={}", endpoint);
    }

    println!("cargo:rerun-if-env-changed=HUGGINGFACE_API_KEY");
    println!("cargo:rerun-if-env-changed=CLASSIFIER_ENDPOINT");
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-changed=../.env");
}
