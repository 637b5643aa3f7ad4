//! Windows Image Acquisition 2.0 backend.
//!
//! Devices are enumerated through `IWiaDevMgr2`, settings are written to the
//! first child item's property storage and images are downloaded through
//! `IWiaTransfer` into an in-memory stream.

use super::{
    AcquiredImage, DeviceInfo, DeviceType, ImageFormat, ImagingService, PropertyId, ScanDevice,
    ScanItem,
};
use crate::utils::error::ImagingError;
use log::{debug, info};
use std::ffi::c_void;
use windows::core::{implement, Interface, BSTR, GUID, PROPVARIANT};
use windows::Win32::Devices::ImageAcquisition::{
    IEnumWiaItem2, IWiaDevMgr2, IWiaItem2, IWiaPropertyStorage, IWiaTransfer,
    IWiaTransferCallback, IWiaTransferCallback_Impl, WiaDevMgr2, WiaTransferParams,
};
use windows::Win32::System::Com::StructuredStorage::{
    InitPropVariantFromCLSID, PROPSPEC, PROPSPEC_0, PRSPEC_PROPID,
};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, IStream, CLSCTX_LOCAL_SERVER,
    COINIT_APARTMENTTHREADED, STREAM_SEEK_SET,
};
use windows::Win32::UI::Shell::SHCreateMemStream;

// Device information properties
const WIA_DIP_DEV_ID: u32 = 2;
const WIA_DIP_DEV_TYPE: u32 = 5;
const WIA_DIP_DEV_NAME: u32 = 7;

// Item properties
const WIA_IPA_FIRST: u32 = 4098;
const WIA_IPA_FORMAT: u32 = 4106;

const WIA_IMG_FMT_JPEG: GUID = GUID::from_u128(0xb96b3cae_0728_11d3_9d7b_0000f81ef32e);

const READ_CHUNK: usize = 64 * 1024;

fn platform(context: &str, err: windows::core::Error) -> ImagingError {
    ImagingError::Platform(format!("{}: {}", context, err))
}

fn propspec(id: u32) -> PROPSPEC {
    PROPSPEC {
        ulKind: PRSPEC_PROPID,
        Anonymous: PROPSPEC_0 { propid: id },
    }
}

fn read_property(storage: &IWiaPropertyStorage, id: u32) -> windows::core::Result<PROPVARIANT> {
    let spec = [propspec(id)];
    let mut value = [PROPVARIANT::default()];
    unsafe { storage.ReadMultiple(1, spec.as_ptr(), value.as_mut_ptr())? };
    let [value] = value;
    Ok(value)
}

fn write_property(
    storage: &IWiaPropertyStorage,
    id: u32,
    value: PROPVARIANT,
) -> windows::core::Result<()> {
    let spec = [propspec(id)];
    let value = [value];
    unsafe { storage.WriteMultiple(1, spec.as_ptr(), value.as_ptr(), WIA_IPA_FIRST) }
}

fn format_guid(format: ImageFormat) -> GUID {
    match format {
        ImageFormat::Jpeg => WIA_IMG_FMT_JPEG,
    }
}

/// Keeps COM initialised for as long as the service lives
struct ComApartment;

impl ComApartment {
    fn enter() -> Result<Self, ImagingError> {
        unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) }
            .ok()
            .map_err(|e| platform("Failed to initialise COM", e))?;
        Ok(Self)
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

/// WIA 2.0 device manager
pub struct WiaService {
    manager: IWiaDevMgr2,
    _apartment: ComApartment,
}

impl WiaService {
    pub fn new() -> Result<Self, ImagingError> {
        let apartment = ComApartment::enter()?;
        let manager: IWiaDevMgr2 =
            unsafe { CoCreateInstance(&WiaDevMgr2, None, CLSCTX_LOCAL_SERVER) }
                .map_err(|e| platform("Failed to create WIA device manager", e))?;

        Ok(Self {
            manager,
            _apartment: apartment,
        })
    }

    fn describe(index: usize, storage: &IWiaPropertyStorage) -> windows::core::Result<DeviceInfo> {
        let id = BSTR::try_from(&read_property(storage, WIA_DIP_DEV_ID)?)?;
        let name = BSTR::try_from(&read_property(storage, WIA_DIP_DEV_NAME)?)?;
        let raw_type = i32::try_from(&read_property(storage, WIA_DIP_DEV_TYPE)?)? as u32;

        Ok(DeviceInfo {
            index,
            id: id.to_string(),
            name: name.to_string(),
            // STI device type lives in the high word
            device_type: DeviceType::from_sti_code(raw_type >> 16),
        })
    }
}

impl ImagingService for WiaService {
    type Device = WiaDevice;

    fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>, ImagingError> {
        let devices = unsafe { self.manager.EnumDeviceInfo(0) }
            .map_err(|e| platform("Failed to enumerate devices", e))?;

        let mut found = Vec::new();
        loop {
            let mut storage: Option<IWiaPropertyStorage> = None;
            let mut fetched = 0u32;
            unsafe { devices.Next(1, &mut storage, &mut fetched) }
                .ok()
                .map_err(|e| platform("Failed to read device list", e))?;

            let Some(storage) = storage.filter(|_| fetched == 1) else {
                break;
            };

            let info = Self::describe(found.len() + 1, &storage)
                .map_err(|e| platform("Failed to read device properties", e))?;
            debug!("Found device {}: {} ({:?})", info.index, info.name, info.device_type);
            found.push(info);
        }

        Ok(found)
    }

    fn connect(&self, device: &DeviceInfo) -> Result<Self::Device, ImagingError> {
        info!("Connecting to {}", device.name);
        let root = unsafe { self.manager.CreateDevice(0, &BSTR::from(device.id.as_str())) }
            .map_err(|e| platform(&format!("Failed to connect to {}", device.name), e))?;

        Ok(WiaDevice {
            name: device.name.clone(),
            root,
        })
    }
}

/// Connected WIA device (root item)
pub struct WiaDevice {
    name: String,
    root: IWiaItem2,
}

impl ScanDevice for WiaDevice {
    type Item = WiaItem;

    fn scan_item(&self) -> Result<Self::Item, ImagingError> {
        let children: IEnumWiaItem2 = unsafe { self.root.EnumChildItems(None) }
            .map_err(|e| platform("Failed to enumerate device items", e))?;

        let mut item: Option<IWiaItem2> = None;
        let mut fetched = 0u32;
        unsafe { children.Next(1, &mut item, &mut fetched) }
            .ok()
            .map_err(|e| platform("Failed to read device items", e))?;

        let item = item
            .filter(|_| fetched == 1)
            .ok_or_else(|| ImagingError::NoScanItem(self.name.clone()))?;
        let properties = item
            .cast::<IWiaPropertyStorage>()
            .map_err(|e| platform("Item has no property storage", e))?;

        Ok(WiaItem { item, properties })
    }
}

/// Scanner item (flatbed) of a connected device
pub struct WiaItem {
    item: IWiaItem2,
    properties: IWiaPropertyStorage,
}

impl ScanItem for WiaItem {
    fn set_property(&mut self, id: PropertyId, value: i32) -> Result<(), ImagingError> {
        debug!("Setting {} = {}", id, value);
        write_property(&self.properties, id.id(), PROPVARIANT::from(value)).map_err(|e| {
            ImagingError::PropertyRejected {
                property: id.id(),
                value,
                reason: e.to_string(),
            }
        })
    }

    fn transfer(&mut self, format: ImageFormat) -> Result<AcquiredImage, ImagingError> {
        let guid = format_guid(format);
        let format_value = unsafe { InitPropVariantFromCLSID(&guid) }
            .map_err(|e| platform("Failed to encode transfer format", e))?;
        write_property(&self.properties, WIA_IPA_FORMAT, format_value)
            .map_err(|e| ImagingError::TransferFailed(format!("format not accepted: {}", e)))?;

        let stream = unsafe { SHCreateMemStream(None) }
            .ok_or_else(|| ImagingError::TransferFailed("cannot allocate stream".to_string()))?;
        let callback: IWiaTransferCallback = StreamCallback {
            stream: stream.clone(),
        }
        .into();

        let transfer = self
            .item
            .cast::<IWiaTransfer>()
            .map_err(|e| platform("Item does not support transfers", e))?;

        info!("Acquiring image...");
        unsafe { transfer.Download(0, &callback) }
            .map_err(|e| ImagingError::TransferFailed(e.to_string()))?;

        let bytes = drain_stream(&stream)
            .map_err(|e| ImagingError::TransferFailed(format!("cannot read image: {}", e)))?;
        debug!("Downloaded {} bytes", bytes.len());

        Ok(AcquiredImage { format, bytes })
    }
}

fn drain_stream(stream: &IStream) -> windows::core::Result<Vec<u8>> {
    unsafe { stream.Seek(0, STREAM_SEEK_SET, None)? };

    let mut bytes = Vec::new();
    let mut chunk = vec![0u8; READ_CHUNK];
    loop {
        let mut read = 0u32;
        unsafe {
            stream
                .Read(
                    chunk.as_mut_ptr() as *mut c_void,
                    chunk.len() as u32,
                    Some(&mut read as *mut u32),
                )
                .ok()?
        };
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..read as usize]);
    }

    Ok(bytes)
}

/// Hands WIA the memory stream to download into
#[implement(IWiaTransferCallback)]
struct StreamCallback {
    stream: IStream,
}

impl IWiaTransferCallback_Impl for StreamCallback_Impl {
    fn TransferCallback(
        &self,
        _lflags: i32,
        pwiatransferparams: *const WiaTransferParams,
    ) -> windows::core::Result<()> {
        if let Some(params) = unsafe { pwiatransferparams.as_ref() } {
            debug!(
                "Transfer progress: {}% ({} bytes)",
                params.lPercentComplete, params.ulTransferredBytes
            );
            params.hrErrorStatus.ok()?;
        }
        Ok(())
    }

    fn GetNextStream(
        &self,
        _lflags: i32,
        _bstritemname: &BSTR,
        _bstrfullitemname: &BSTR,
    ) -> windows::core::Result<IStream> {
        Ok(self.stream.clone())
    }
}
