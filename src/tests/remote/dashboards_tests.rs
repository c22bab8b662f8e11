    use super::*;

    #[test]
    fn export_formats_map_to_backend_file_names() {
        assert_eq!(ExportFormat::parse("XML").unwrap(), ExportFormat::Xml);
        assert_eq!(ExportFormat::parse("csv").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse("all").unwrap(), ExportFormat::All);
        assert!(matches!(
            ExportFormat::parse("pdf"),
            Err(ConsoleError::InvalidInput { .. })
        ));

        assert_eq!(ExportFormat::Xml.file_name("101"), "101.xml");
        assert_eq!(ExportFormat::Csv.file_name("101"), "101.csv");
        assert_eq!(ExportFormat::All.file_name("101"), "all.xml");
        assert!(!ExportFormat::All.needs_channel());
    }

    #[test]
    fn per_service_export_without_channel_is_refused_locally() {
        let client = BackendClient::new(&ConsoleConfig::default()).expect("client");
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let err = rt
            .block_on(client.export_epg(ExportFormat::Csv, "  "))
            .unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidInput { .. }));
    }
