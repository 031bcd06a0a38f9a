fn main() {
    // Only embed Windows resources on Windows targets
    #[cfg(target_os = "windows")]
    {
        let mut res = winres::WindowsResource::new();
        res.set("FileDescription", "ffwizard Image Conversion Wizard");
        res.set("ProductName", "ffwizard");

        if let Err(e) = res.compile() {
            eprintln!("Warning: Failed to compile Windows resources: {}", e);
        }
    }
}
